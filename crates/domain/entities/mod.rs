pub mod messages;
pub mod plans;
pub mod subscriptions;
