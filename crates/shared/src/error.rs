//! Application-wide error types.
//!
//! Component crates define their own precise error enums; `AppError` is the
//! cross-cutting vocabulary the transport collaborator maps onto status
//! codes. The kinds mirror what the domain can actually raise: missing
//! entities, duplicates, malformed input, illegal state, and out-of-order
//! period transitions.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate fiscal year or cost center code).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed or rejected input (bad dates, self-parenting, cycles).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not valid for the entity's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Fiscal periods must close in order and reopen in reverse order.
    #[error("Sequence violation: {0}")]
    SequenceViolation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Conflict(_) => 409,
            Self::InvalidState(_) | Self::SequenceViolation(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::SequenceViolation(_) => "SEQUENCE_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if this error is caller-recoverable.
    ///
    /// Everything except database/internal failures can be corrected by the
    /// caller changing the request.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
