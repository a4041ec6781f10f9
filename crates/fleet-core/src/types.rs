//! # Domain Types
//!
//! Core domain types used throughout Fleet.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐            ┌─────────────────┐                    │
//! │  │      Car        │  engine    │     Engine      │                    │
//! │  │  ─────────────  │ ─────────► │  ─────────────  │                    │
//! │  │  id (UUID)      │ (non-owning│  engine_id      │                    │
//! │  │  name, year     │  reference)│  displacement   │                    │
//! │  │  brand          │            │  no_of_cylinders│                    │
//! │  │  fuel_type      │            │  car_range      │                    │
//! │  │  price          │            └─────────────────┘                    │
//! │  │  created_at     │                                                    │
//! │  │  updated_at     │            ┌─────────────────┐                    │
//! │  └─────────────────┘            │    FuelType     │                    │
//! │                                 │  Petrol Electric│                    │
//! │                                 │  Diesel Hybrid  │                    │
//! │                                 └─────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are generated by the store on creation and never change.
//! Request types carry only the caller-supplied fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Engine
// =============================================================================

/// An engine row.
///
/// `Default` is the zero-valued engine: nil id and zero numbers. A car whose
/// engine reference no longer resolves carries zero numbers here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    /// Unique identifier (UUID v4), generated on creation.
    pub engine_id: Uuid,

    /// Displacement in cc.
    pub displacement: i64,

    /// Number of cylinders.
    pub no_of_cylinders: i64,

    /// Range in km.
    pub car_range: i64,
}

impl Engine {
    /// An engine carrying only its identifier, all numeric fields zero.
    pub fn reference(engine_id: Uuid) -> Self {
        Engine {
            engine_id,
            ..Engine::default()
        }
    }
}

/// Fields supplied when creating or updating an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRequest {
    pub displacement: i64,
    pub no_of_cylinders: i64,
    pub car_range: i64,
}

// =============================================================================
// Fuel Type
// =============================================================================

/// The fuel a car runs on.
///
/// Stored as text in the `car` table; membership is enforced by validation,
/// not by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Electric,
    Diesel,
    Hybrid,
}

impl FuelType {
    /// Every accepted fuel type, in display order.
    pub const ALL: [FuelType; 4] = [
        FuelType::Petrol,
        FuelType::Electric,
        FuelType::Diesel,
        FuelType::Hybrid,
    ];

    /// Returns the stored/text form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Electric => "Electric",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a [`FuelType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFuelType(pub String);

impl fmt::Display for UnknownFuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown fuel type: {}", self.0)
    }
}

impl std::error::Error for UnknownFuelType {}

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    /// Exact, case-sensitive match against the stored form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.as_str() == s)
            .ok_or_else(|| UnknownFuelType(s.to_string()))
    }
}

// =============================================================================
// Car
// =============================================================================

/// A car row, with its engine embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier (UUID v4), generated on creation.
    pub id: Uuid,

    pub name: String,

    /// Model year, kept as text (e.g. "2021").
    pub year: String,

    pub brand: String,

    /// One of the [`FuelType`] text forms.
    pub fuel_type: String,

    /// The referenced engine. Numeric fields are zero when the engine detail
    /// was not requested or the reference no longer resolves.
    pub engine: Engine,

    pub price: f64,

    /// Fixed at creation.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or updating a car.
///
/// `engine.engine_id` is the reference written to the car row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRequest {
    pub name: String,
    pub year: String,
    pub brand: String,
    pub fuel_type: String,
    pub engine: Engine,
    pub price: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
