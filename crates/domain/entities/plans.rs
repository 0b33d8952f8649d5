/// A subscription tier offered by the shop. Plans are fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntity {
    pub id: &'static str,
    pub name: &'static str,
    pub price_minor: i64,
}
