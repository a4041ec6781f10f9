//! # fleet-service: Service Layer for Fleet
//!
//! Validates request shape and delegates to the store traits from
//! `fleet-db`. Services never touch SQL and never check engine existence;
//! store errors come back unchanged inside [`ServiceError::Store`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_db::{Database, DbConfig};
//! use fleet_service::{CarService, EngineService};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let engines = EngineService::new(Arc::new(db.engines()));
//! let cars = CarService::new(Arc::new(db.cars()));
//!
//! let ctx = db.request_context();
//! let engine = engines.create_engine(&ctx, &engine_request).await?;
//! ```

pub mod car_service;
pub mod engine_service;
pub mod error;

#[cfg(test)]
mod testing;

pub use car_service::CarService;
pub use engine_service::EngineService;
pub use error::{ServiceError, ServiceErrorKind, ServiceResult};
