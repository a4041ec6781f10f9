//! # Database Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Structured classification, never by message  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError::kind() → ErrorKind                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (fleet-service) ← Forwarded unchanged                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Boundary layer maps ErrorKind to a status code                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Coarse classification of a [`DbError`].
///
/// Callers branch on this instead of inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Supplied id is not a well-formed UUID. Raised before any query.
    InvalidIdentifier,
    /// Zero rows matched or were affected.
    NotFound,
    /// A create referenced an entity that does not exist.
    ReferentialIntegrity,
    /// Any other storage failure.
    Persistence,
    /// The caller's cancellation handle fired.
    Cancelled,
    /// The caller's deadline passed.
    Timeout,
}

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Identifier is not a canonical UUID string.
    #[error("Invalid {entity} id: '{value}'")]
    InvalidIdentifier { entity: String, value: String },

    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_optional` returns no row
    /// - UPDATE/DELETE affected zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Creating a car whose engine id is not in the engine table
    #[error("{entity} does not exist: {id}")]
    ReferentialIntegrity { entity: String, id: String },

    /// Foreign key constraint reported by the driver.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Unique constraint violation.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Pool closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin/commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error (decode failures, I/O, ...).
    #[error("Internal database error: {0}")]
    Internal(String),

    /// The request was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// The request deadline passed before it completed.
    #[error("Operation timed out")]
    Timeout,
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an InvalidIdentifier error.
    pub fn invalid_id(entity: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::InvalidIdentifier {
            entity: entity.into(),
            value: value.into(),
        }
    }

    /// Creates a ReferentialIntegrity error for a missing referenced entity.
    pub fn missing_reference(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::ReferentialIntegrity {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Wraps a begin/commit failure.
    pub fn transaction(err: sqlx::Error) -> Self {
        match DbError::from(err) {
            DbError::QueryFailed(msg) | DbError::Internal(msg) => DbError::TransactionFailed(msg),
            other => other,
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            DbError::NotFound { .. } => ErrorKind::NotFound,
            DbError::ReferentialIntegrity { .. } | DbError::ForeignKeyViolation { .. } => {
                ErrorKind::ReferentialIntegrity
            }
            DbError::UniqueViolation { .. }
            | DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::TransactionFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => ErrorKind::Persistence,
            DbError::Cancelled => ErrorKind::Cancelled,
            DbError::Timeout => ErrorKind::Timeout,
        }
    }

    /// Shorthand for `kind() == ErrorKind::NotFound`.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → driver ErrorKind (unique / foreign key / other)
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => DbError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                },
                sqlx::error::ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                    message: db_err.message().to_string(),
                },
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
