pub mod customer_info;
pub mod diagnostics;
pub mod enums;
pub mod identities;
pub mod messages;
pub mod orders;
pub mod plans;
