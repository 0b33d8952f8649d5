pub mod messages;
pub mod subscriptions;
