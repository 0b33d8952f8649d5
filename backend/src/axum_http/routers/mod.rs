pub mod accounts;
pub mod contact;
pub mod diagnostics;
pub mod plans;
pub mod subscriptions;
