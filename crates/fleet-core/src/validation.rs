//! # Validation Module
//!
//! Request validation for Fleet.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Boundary (external)                                          │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service (fleet-service)                                      │
//! │  └── THIS MODULE: request shape rules                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (fleet-db)                                             │
//! │  ├── Identifier format                                                 │
//! │  ├── Engine existence on car creation                                  │
//! │  └── Affected-row counts                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use fleet_core::validation::{validate_fuel_type, validate_year};
//!
//! validate_fuel_type("Hybrid").unwrap();
//! validate_year("2019").unwrap();
//! ```

use chrono::{Datelike, Utc};

use crate::error::ValidationError;
use crate::types::{CarRequest, Engine, EngineRequest, FuelType};
use crate::{MAX_TEXT_LEN, MIN_MODEL_YEAR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates an engine create/update request.
///
/// ## Rules
/// - displacement, no_of_cylinders and car_range must all be > 0
pub fn validate_engine_request(request: &EngineRequest) -> ValidationResult<()> {
    validate_positive("displacement", request.displacement)?;
    validate_positive("no_of_cylinders", request.no_of_cylinders)?;
    validate_positive("car_range", request.car_range)?;
    Ok(())
}

/// Validates the engine embedded in a car request.
///
/// ## Rules
/// - engine_id must not be the nil UUID
/// - numeric fields must all be > 0
pub fn validate_engine(engine: &Engine) -> ValidationResult<()> {
    if engine.engine_id.is_nil() {
        return Err(ValidationError::required("engine_id"));
    }

    validate_positive("displacement", engine.displacement)?;
    validate_positive("no_of_cylinders", engine.no_of_cylinders)?;
    validate_positive("car_range", engine.car_range)?;
    Ok(())
}

/// Validates a car create/update request.
///
/// Checks run in a fixed order and the first failure is returned:
/// name, brand, price, year, engine, fuel type.
pub fn validate_car_request(request: &CarRequest) -> ValidationResult<()> {
    validate_name(&request.name)?;
    validate_brand(&request.brand)?;
    validate_price(request.price)?;
    validate_year(&request.year)?;
    validate_engine(&request.engine)?;
    validate_fuel_type(&request.fuel_type)?;
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a car name.
///
/// ## Example
/// ```rust
/// use fleet_core::validation::validate_name;
///
/// assert!(validate_name("Corolla").is_ok());
/// assert!(validate_name("  ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name)
}

/// Validates a brand.
pub fn validate_brand(brand: &str) -> ValidationResult<()> {
    validate_text("brand", brand)
}

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a model year.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as an integer
/// - Must be between MIN_MODEL_YEAR (1950) and the current year
///
/// ## Example
/// ```rust
/// use fleet_core::validation::validate_year;
///
/// assert!(validate_year("2020").is_ok());
/// assert!(validate_year("1949").is_err());
/// assert!(validate_year("twenty").is_err());
/// ```
pub fn validate_year(year: &str) -> ValidationResult<()> {
    let year = year.trim();

    if year.is_empty() {
        return Err(ValidationError::required("year"));
    }

    let parsed: i32 = year.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "year".to_string(),
        reason: "must be a valid number".to_string(),
    })?;

    let current = Utc::now().year();
    if parsed < MIN_MODEL_YEAR || parsed > current {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: MIN_MODEL_YEAR as i64,
            max: current as i64,
        });
    }

    Ok(())
}

/// Validates a fuel type against [`FuelType::ALL`].
///
/// ## Example
/// ```rust
/// use fleet_core::validation::validate_fuel_type;
///
/// assert!(validate_fuel_type("Diesel").is_ok());
/// assert!(validate_fuel_type("Steam").is_err());
/// ```
pub fn validate_fuel_type(fuel_type: &str) -> ValidationResult<()> {
    fuel_type
        .parse::<FuelType>()
        .map(|_| ())
        .map_err(|_| ValidationError::NotAllowed {
            field: "fuel_type".to_string(),
            allowed: FuelType::ALL.iter().map(|f| f.as_str().to_string()).collect(),
        })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be a finite number > 0
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::must_be_positive("price"));
    }

    Ok(())
}

fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates that an identifier was supplied at all.
///
/// Format checks belong to the store, which rejects malformed ids with
/// `InvalidIdentifier` before any query runs.
pub fn validate_required_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
