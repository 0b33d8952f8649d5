pub mod plan_terms;
pub mod subscription_statuses;
