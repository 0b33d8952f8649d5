pub mod diagnostics;
pub mod identities;
pub mod messages;
pub mod orders;
pub mod plans;

use thiserror::Error;

/// Input problems detected before anything is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("customer info missing")]
    MissingCustomerInfo,
    #[error("missing fields")]
    MissingFields,
}

pub type UseCaseResult<T> = std::result::Result<T, ValidationError>;
