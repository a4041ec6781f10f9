//! Store capabilities.
//!
//! The service layer depends on these traits, not on the SQLite repositories,
//! so a test double can stand in for either store without touching callers.
//!
//! Every method takes the caller's [`RequestContext`]; an operation that is
//! cancelled or outlives its deadline fails with `Cancelled` / `Timeout` and
//! leaves no durable partial effect.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::DbResult;
use fleet_core::{Car, CarRequest, Engine, EngineRequest};

/// Persistence of engine rows.
#[async_trait]
pub trait EngineStore: Send + Sync {
    /// Inserts a new engine under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Persistence-kind error if the insert cannot be committed.
    async fn create_engine(&self, ctx: &RequestContext, request: &EngineRequest) -> DbResult<Engine>;

    /// Looks up an engine.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if `id` is not a UUID (no query runs)
    /// - `NotFound` if no row matches
    async fn get_engine_by_id(&self, ctx: &RequestContext, id: &str) -> DbResult<Engine>;

    /// Replaces the three numeric fields of an engine.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if `id` is not a UUID
    /// - `NotFound` if the update affected zero rows
    async fn update_engine(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: &EngineRequest,
    ) -> DbResult<Engine>;

    /// Deletes an engine, returning the row as it was just before deletion.
    ///
    /// Cars referencing the engine are left untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if `id` is not a UUID
    /// - `NotFound` if the delete affected zero rows
    async fn delete_engine(&self, ctx: &RequestContext, id: &str) -> DbResult<Engine>;
}

/// Persistence of car rows.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Looks up a car with its engine detail.
    ///
    /// A dangling engine reference yields zero numeric engine fields rather
    /// than an error.
    async fn get_car_by_id(&self, ctx: &RequestContext, id: &str) -> DbResult<Car>;

    /// Returns every car of `brand`, in insertion order.
    ///
    /// With `include_engine = false` only the bare engine reference is
    /// filled in. No match is an empty Vec, not an error.
    async fn get_car_by_brand(
        &self,
        ctx: &RequestContext,
        brand: &str,
        include_engine: bool,
    ) -> DbResult<Vec<Car>>;

    /// Inserts a new car after checking its engine reference.
    ///
    /// # Errors
    ///
    /// `ReferentialIntegrity` if `request.engine.engine_id` is not in the
    /// engine table; nothing is written in that case.
    async fn create_car(&self, ctx: &RequestContext, request: &CarRequest) -> DbResult<Car>;

    /// Replaces every mutable field and the engine reference, refreshing
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if `id` is not a UUID
    /// - `NotFound` if the update affected zero rows
    async fn update_car(&self, ctx: &RequestContext, id: &str, request: &CarRequest) -> DbResult<Car>;

    /// Deletes a car, returning the row as it was just before deletion.
    async fn delete_car(&self, ctx: &RequestContext, id: &str) -> DbResult<Car>;
}
