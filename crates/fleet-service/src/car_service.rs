//! # Car Service
//!
//! Validates car requests, then hands them to a [`CarStore`].
//!
//! ## Request Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_car / update_car                              │
//! │                                                                         │
//! │  name ─► brand ─► price ─► year ─► engine ─► fuel_type                 │
//! │    │       │        │        │        │          │                      │
//! │    └───────┴────────┴────────┴────────┴──────────┴─► first failure     │
//! │                                                      = Validation       │
//! │  all pass                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CarStore (engine existence is checked there, not here)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use fleet_core::validation::{validate_brand, validate_car_request, validate_required_id};
use fleet_core::{Car, CarRequest};
use fleet_db::{CarStore, RequestContext};
use tracing::debug;

use crate::error::{rejected, ServiceResult};

/// Car operations over any [`CarStore`].
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CarStore>,
}

impl CarService {
    /// Wraps a store; the service holds no other state.
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        CarService { store }
    }

    /// Fetches one car with its engine. A car whose engine is gone still
    /// comes back, with zeroed engine numbers.
    pub async fn get_car_by_id(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Car> {
        validate_required_id("id", id).map_err(rejected)?;

        Ok(self.store.get_car_by_id(ctx, id).await?)
    }

    /// Cars of one brand, matched exactly. `include_engine` controls whether
    /// engine numbers are filled in.
    pub async fn get_car_by_brand(
        &self,
        ctx: &RequestContext,
        brand: &str,
        include_engine: bool,
    ) -> ServiceResult<Vec<Car>> {
        validate_brand(brand).map_err(rejected)?;

        let cars = self.store.get_car_by_brand(ctx, brand, include_engine).await?;
        debug!(brand = %brand, count = cars.len(), include_engine, "Cars listed");
        Ok(cars)
    }

    /// Creates a car. The request's engine must already exist; the store
    /// answers `ReferentialIntegrity` otherwise.
    pub async fn create_car(&self, ctx: &RequestContext, request: &CarRequest) -> ServiceResult<Car> {
        validate_car_request(request).map_err(rejected)?;

        let car = self.store.create_car(ctx, request).await?;
        debug!(car_id = %car.id, brand = %car.brand, "Car created");
        Ok(car)
    }

    /// Overwrites every field of an existing car and bumps `updated_at`.
    pub async fn update_car(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: &CarRequest,
    ) -> ServiceResult<Car> {
        validate_required_id("id", id).map_err(rejected)?;
        validate_car_request(request).map_err(rejected)?;

        let car = self.store.update_car(ctx, id, request).await?;
        debug!(car_id = %car.id, "Car updated");
        Ok(car)
    }

    /// Deletes a car and returns it as it was just before removal.
    pub async fn delete_car(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Car> {
        validate_required_id("id", id).map_err(rejected)?;

        let car = self.store.delete_car(ctx, id).await?;
        debug!(car_id = %car.id, "Car deleted");
        Ok(car)
    }
}
