//! # Service Error Type
//!
//! A service call fails either before reaching the store (bad request shape)
//! or inside it (the store's own error, forwarded unchanged).

use fleet_core::ValidationError;
use fleet_db::{DbError, ErrorKind};
use thiserror::Error;
use tracing::debug;

/// Errors returned by [`EngineService`](crate::EngineService) and
/// [`CarService`](crate::CarService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected before any store call.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The store call failed.
    #[error(transparent)]
    Store(#[from] DbError),
}

/// Classification of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// Rejected by request validation; the store was never called.
    Validation,
    /// The store's own classification.
    Store(ErrorKind),
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::Validation(_) => ServiceErrorKind::Validation,
            ServiceError::Store(err) => ServiceErrorKind::Store(err.kind()),
        }
    }

    /// The offending field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            ServiceError::Validation(err) => Some(err.field()),
            ServiceError::Store(_) => None,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Logs a rejected request and lifts the error into [`ServiceError`].
pub(crate) fn rejected(err: ValidationError) -> ServiceError {
    debug!(field = err.field(), error = %err, "Request rejected");
    ServiceError::Validation(err)
}
