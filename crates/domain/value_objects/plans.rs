use serde::Serialize;
use serde_json::Number;

use crate::domain::entities::plans::PlanEntity;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDto {
    pub id: String,
    pub name: String,
    pub price: Number,
}

/// Whole amounts go out as integers (`10`, not `10.0`).
fn major_units(price_minor: i64) -> Number {
    if price_minor % 100 == 0 {
        return Number::from(price_minor / 100);
    }

    Number::from_f64(price_minor as f64 / 100.0).unwrap_or_else(|| Number::from(price_minor / 100))
}

impl From<PlanEntity> for PlanDto {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            price: major_units(value.price_minor),
        }
    }
}
