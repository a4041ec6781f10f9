//! # Engine Service
//!
//! Validates engine requests, then hands them to an [`EngineStore`].

use std::sync::Arc;

use fleet_core::validation::{validate_engine_request, validate_required_id};
use fleet_core::{Engine, EngineRequest};
use fleet_db::{EngineStore, RequestContext};
use tracing::debug;

use crate::error::{rejected, ServiceResult};

/// Engine operations over any [`EngineStore`].
#[derive(Clone)]
pub struct EngineService {
    store: Arc<dyn EngineStore>,
}

impl EngineService {
    /// Wraps a store; the service holds no other state.
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        EngineService { store }
    }

    /// Creates an engine after checking every number is positive.
    pub async fn create_engine(
        &self,
        ctx: &RequestContext,
        request: &EngineRequest,
    ) -> ServiceResult<Engine> {
        validate_engine_request(request).map_err(rejected)?;

        let engine = self.store.create_engine(ctx, request).await?;
        debug!(engine_id = %engine.engine_id, "Engine created");
        Ok(engine)
    }

    /// Fetches one engine. A blank id is rejected here; anything else is
    /// left to the store to parse.
    pub async fn get_engine_by_id(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Engine> {
        validate_required_id("id", id).map_err(rejected)?;

        Ok(self.store.get_engine_by_id(ctx, id).await?)
    }

    /// Replaces all three numbers of an existing engine.
    pub async fn update_engine(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: &EngineRequest,
    ) -> ServiceResult<Engine> {
        validate_required_id("id", id).map_err(rejected)?;
        validate_engine_request(request).map_err(rejected)?;

        let engine = self.store.update_engine(ctx, id, request).await?;
        debug!(engine_id = %engine.engine_id, "Engine updated");
        Ok(engine)
    }

    /// Deletes an engine. Cars that reference it are not touched.
    pub async fn delete_engine(&self, ctx: &RequestContext, id: &str) -> ServiceResult<Engine> {
        validate_required_id("id", id).map_err(rejected)?;

        let engine = self.store.delete_engine(ctx, id).await?;
        debug!(engine_id = %engine.engine_id, "Engine deleted");
        Ok(engine)
    }
}
