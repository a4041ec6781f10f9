//! # Error Types
//!
//! Validation error type for fleet-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fleet-core errors (this file)                                         │
//! │  └── ValidationError  - Request shape failures                         │
//! │                                                                         │
//! │  fleet-db errors (separate crate)                                      │
//! │  └── DbError          - Store failures, classified by ErrorKind        │
//! │                                                                         │
//! │  fleet-service errors                                                  │
//! │  └── ServiceError     - Validation | Store, forwarded to the boundary  │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │                         ├──► ServiceError ──► boundary layer           │
//! │  DbError ───────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when a request doesn't meet requirements.
/// Raised before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric year).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a MustBePositive error for the given field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
