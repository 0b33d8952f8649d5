use iptv_core::domain::{
    entities::plans::PlanEntity,
    value_objects::{enums::plan_terms::PlanTerm, plans::PlanDto},
};
use tracing::debug;

const PLAN_CATALOG: [PlanEntity; 3] = [
    PlanEntity {
        id: PlanTerm::Monthly.as_str(),
        name: "Monthly Plan",
        price_minor: 1000,
    },
    PlanEntity {
        id: PlanTerm::TwoMonths.as_str(),
        name: "2 Months Plan",
        price_minor: 1800,
    },
    PlanEntity {
        id: PlanTerm::Annual.as_str(),
        name: "Annual Plan",
        price_minor: 7000,
    },
];

/// Static plan catalog. Consumers render plans in the returned order,
/// cheapest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanCatalogUseCase;

impl PlanCatalogUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn list_plans(&self) -> Vec<PlanDto> {
        let mut plans = PLAN_CATALOG.to_vec();
        plans.sort_by_key(|plan| plan.price_minor);
        debug!(plan_count = plans.len(), "plans: catalog listed");
        plans.into_iter().map(PlanDto::from).collect()
    }
}
