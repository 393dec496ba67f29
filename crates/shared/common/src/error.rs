//! Unified error handling.
//!
//! Every error carries a stable `name` (e.g. `NotFoundError`) and a
//! human-readable message, and maps to an HTTP status for whatever transport
//! sits in front of the service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, MSG_INSUFFICIENT_AGE, MSG_PENDENT_RENTAL, MSG_RENTAL_CLOSED};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Lookups
    #[error("{0} not found.")]
    NotFound(String),

    // Rental rules
    #[error("{}", MSG_PENDENT_RENTAL)]
    PendentRental,

    #[error("{}", MSG_INSUFFICIENT_AGE)]
    InsufficientAge,

    #[error("{}", MSG_RENTAL_CLOSED)]
    RentalClosed,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Store errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    name: String,
    message: String,
}

impl AppError {
    /// Stable error name exposed to callers
    pub fn name(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFoundError",
            AppError::PendentRental => "PendentRentalError",
            AppError::InsufficientAge => "InsufficientAgeError",
            AppError::RentalClosed => "RentalClosedError",
            AppError::Validation(_) => "ValidationError",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DatabaseError",
            AppError::Internal(_) => "InternalError",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PendentRental | AppError::RentalClosed => StatusCode::CONFLICT,
            AppError::InsufficientAge => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is a rule violation (as opposed to a store or internal failure)
    pub fn is_domain(&self) -> bool {
        !self.status().is_server_error()
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                name: self.name().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(entity) => AppError::NotFound(entity),
            DomainError::PendentRental => AppError::PendentRental,
            DomainError::InsufficientAge => AppError::InsufficientAge,
            DomainError::RentalClosed => AppError::RentalClosed,
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
