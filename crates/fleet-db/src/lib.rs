//! # fleet-db: Database Layer for Fleet
//!
//! This crate provides the engine and car stores. It uses SQLite for
//! storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Fleet Data Flow                                │
//! │                                                                         │
//! │  fleet-service (validates, then delegates)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     fleet-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (engine.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │  car.rs)      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ EngineStore   │    │ 001_engine   │  │   │
//! │  │   │ RequestContext│    │ CarStore      │    │ 002_car      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                SQLite Database (FLEET_DATABASE_PATH)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool and request settings, loadable from the environment
//! - [`context`] - Per-call cancellation and deadlines
//! - [`pool`] - Connection pool creation
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - Store traits the service layer depends on
//! - [`repository`] - SQLite implementations of the stores
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fleet_db::{CarStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let ctx = db.request_context();
//!
//! let toyotas = db.cars().get_car_by_brand(&ctx, "Toyota", true).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod context;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use context::{CancelHandle, RequestContext};
pub use error::{DbError, DbResult, ErrorKind};
pub use pool::Database;
pub use store::{CarStore, EngineStore};

// Repository re-exports for convenience
pub use repository::car::CarRepository;
pub use repository::engine::EngineRepository;
