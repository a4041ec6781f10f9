//! # Repository Module
//!
//! SQLite implementations of the store traits.
//!
//! ## Transaction Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Call = One Transaction                           │
//! │                                                                         │
//! │  store.delete_car(ctx, id)                                             │
//! │       │                                                                 │
//! │       ├── parse id ──► InvalidIdentifier (no query)                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  BEGIN                                                          │   │
//! │  │   1. SELECT snapshot ─────────► none? NotFound                  │   │
//! │  │   2. DELETE ──────────────────► 0 rows? NotFound                │   │
//! │  │  COMMIT                                                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Any early return drops the transaction uncommitted → ROLLBACK         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EngineRepository`](engine::EngineRepository) - Engine CRUD
//! - [`CarRepository`](car::CarRepository) - Car CRUD with engine join

pub mod car;
pub mod engine;

use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// Parses a caller-supplied identifier.
///
/// Only the exact 36-character hyphenated form is accepted: no surrounding
/// whitespace, braces, URN prefix or simple form. The parsed value is what
/// gets bound, so letter case does not matter.
pub(crate) fn parse_id(entity: &str, raw: &str) -> DbResult<Uuid> {
    if raw.len() != 36 {
        return Err(DbError::invalid_id(entity, raw));
    }
    Uuid::parse_str(raw).map_err(|_| DbError::invalid_id(entity, raw))
}

/// Parses a UUID read back from a TEXT column.
pub(crate) fn stored_id(column: &str, raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| DbError::Internal(format!("column {column} holds invalid uuid '{raw}': {e}")))
}
