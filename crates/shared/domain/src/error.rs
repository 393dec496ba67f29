//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::constants::{MSG_INSUFFICIENT_AGE, MSG_PENDENT_RENTAL, MSG_RENTAL_CLOSED};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Entity not found
    #[error("{0} not found.")]
    NotFound(String),

    /// User still holds an open rental
    #[error("{}", MSG_PENDENT_RENTAL)]
    PendentRental,

    /// User is younger than the minimum rental age
    #[error("{}", MSG_INSUFFICIENT_AGE)]
    InsufficientAge,

    /// Rental was already closed
    #[error("{}", MSG_RENTAL_CLOSED)]
    RentalClosed,

    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
