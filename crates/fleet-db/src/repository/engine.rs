//! # Engine Repository
//!
//! Database operations for engines.
//!
//! Engines are standalone rows: nothing cascades from them and nothing
//! blocks their deletion. Cars that point at a deleted engine keep the
//! dangling reference.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::{parse_id, stored_id};
use crate::context::RequestContext;
use crate::error::{DbError, DbResult};
use crate::store::EngineStore;
use fleet_core::{Engine, EngineRequest};

const ENTITY: &str = "Engine";

/// An `engine` row as stored; the id is still TEXT.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EngineRow {
    id: String,
    displacement: i64,
    no_of_cylinders: i64,
    car_range: i64,
}

impl EngineRow {
    pub(crate) fn into_engine(self) -> DbResult<Engine> {
        Ok(Engine {
            engine_id: stored_id("id", &self.id)?,
            displacement: self.displacement,
            no_of_cylinders: self.no_of_cylinders,
            car_range: self.car_range,
        })
    }
}

/// Repository for engine database operations.
///
/// ## Usage
/// ```rust,ignore
/// let engines = db.engines();
/// let ctx = db.request_context();
///
/// let engine = engines.create_engine(&ctx, &request).await?;
/// let same = engines.get_engine_by_id(&ctx, &engine.engine_id.to_string()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EngineRepository {
    pool: SqlitePool,
}

impl EngineRepository {
    /// Creates a new EngineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EngineRepository { pool }
    }

    async fn insert(&self, request: &EngineRequest) -> DbResult<Engine> {
        let id = Uuid::new_v4();

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let row = sqlx::query_as::<_, EngineRow>(
            r#"
            INSERT INTO engine (id, displacement, no_of_cylinders, car_range)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, displacement, no_of_cylinders, car_range
            "#,
        )
        .bind(id.to_string())
        .bind(request.displacement)
        .bind(request.no_of_cylinders)
        .bind(request.car_range)
        .fetch_one(&mut *tx)
        .await?;

        let engine = row.into_engine()?;
        tx.commit().await.map_err(DbError::transaction)?;

        debug!(engine_id = %engine.engine_id, "Engine created");
        Ok(engine)
    }

    async fn fetch(&self, id: Uuid) -> DbResult<Engine> {
        let row = sqlx::query_as::<_, EngineRow>(
            "SELECT id, displacement, no_of_cylinders, car_range FROM engine WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.into_engine(),
            None => Err(DbError::not_found(ENTITY, id.to_string())),
        }
    }

    async fn replace(&self, id: Uuid, request: &EngineRequest) -> DbResult<Engine> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let row = sqlx::query_as::<_, EngineRow>(
            r#"
            UPDATE engine
            SET displacement = ?2, no_of_cylinders = ?3, car_range = ?4
            WHERE id = ?1
            RETURNING id, displacement, no_of_cylinders, car_range
            "#,
        )
        .bind(id.to_string())
        .bind(request.displacement)
        .bind(request.no_of_cylinders)
        .bind(request.car_range)
        .fetch_optional(&mut *tx)
        .await?;

        // Zero affected rows: nothing to commit, the dropped tx rolls back.
        let Some(row) = row else {
            return Err(DbError::not_found(ENTITY, id.to_string()));
        };

        let engine = row.into_engine()?;
        tx.commit().await.map_err(DbError::transaction)?;

        debug!(engine_id = %id, "Engine updated");
        Ok(engine)
    }

    async fn remove(&self, id: Uuid) -> DbResult<Engine> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let row = sqlx::query_as::<_, EngineRow>(
            r#"
            DELETE FROM engine
            WHERE id = ?1
            RETURNING id, displacement, no_of_cylinders, car_range
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(DbError::not_found(ENTITY, id.to_string()));
        };

        let engine = row.into_engine()?;
        tx.commit().await.map_err(DbError::transaction)?;

        debug!(engine_id = %id, "Engine deleted");
        Ok(engine)
    }
}

#[async_trait]
impl EngineStore for EngineRepository {
    async fn create_engine(&self, ctx: &RequestContext, request: &EngineRequest) -> DbResult<Engine> {
        ctx.run(self.insert(request)).await
    }

    async fn get_engine_by_id(&self, ctx: &RequestContext, id: &str) -> DbResult<Engine> {
        let id = parse_id(ENTITY, id)?;
        ctx.run(self.fetch(id)).await
    }

    async fn update_engine(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: &EngineRequest,
    ) -> DbResult<Engine> {
        let id = parse_id(ENTITY, id)?;
        ctx.run(self.replace(id, request)).await
    }

    async fn delete_engine(&self, ctx: &RequestContext, id: &str) -> DbResult<Engine> {
        let id = parse_id(ENTITY, id)?;
        ctx.run(self.remove(id)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
