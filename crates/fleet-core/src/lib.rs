//! # fleet-core: Pure Domain Types for Fleet
//!
//! This crate holds the Car and Engine types shared by the store and service
//! layers, together with the request validation rules. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Fleet Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              HTTP handlers (external collaborator)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 fleet-service (validate + forward)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fleet-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ validation│  │   error   │                  │   │
//! │  │   │  Engine   │  │  requests │  │Validation │                  │   │
//! │  │   │   Car     │  │  ids      │  │  Error    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fleet-db (Database Layer)                    │   │
//! │  │          SQLite queries, migrations, engine + car stores        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Engine, Car, requests, FuelType)
//! - [`error`] - Validation error type
//! - [`validation`] - Request validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use fleet_core::validation::validate_engine_request;
//! use fleet_core::EngineRequest;
//!
//! let request = EngineRequest {
//!     displacement: 1998,
//!     no_of_cylinders: 4,
//!     car_range: 650,
//! };
//! assert!(validate_engine_request(&request).is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Oldest model year accepted for a car.
pub const MIN_MODEL_YEAR: i32 = 1950;

/// Longest name or brand accepted.
pub const MAX_TEXT_LEN: usize = 200;
