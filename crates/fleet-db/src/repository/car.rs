//! # Car Repository
//!
//! Database operations for cars.
//!
//! ## Engine Reference
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   car.engine_id → engine.id                             │
//! │                                                                         │
//! │  create_car                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │   SELECT engine WHERE id = ? ──► missing? ReferentialIntegrity         │
//! │   INSERT car                                                           │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Reads LEFT JOIN engine, so a car whose engine was deleted still       │
//! │  comes back: engine_id kept, numeric engine fields zero.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check is the only guard on the reference; the schema declares no
//! foreign key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};
use uuid::Uuid;

use super::engine::EngineRow;
use super::{parse_id, stored_id};
use crate::context::RequestContext;
use crate::error::{DbError, DbResult};
use crate::store::CarStore;
use fleet_core::{Car, CarRequest, Engine};

const ENTITY: &str = "Car";
const ENGINE_ENTITY: &str = "Engine";

const SELECT_WITH_ENGINE: &str = r#"
    SELECT c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
           c.created_at, c.updated_at,
           e.displacement, e.no_of_cylinders, e.car_range
    FROM car c
    LEFT JOIN engine e ON c.engine_id = e.id
"#;

const SELECT_BARE: &str = r#"
    SELECT c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
           c.created_at, c.updated_at
    FROM car c
"#;

/// A `car` row, optionally joined with its engine.
///
/// The engine columns are absent from the bare query and NULL when the
/// referenced engine is gone; both read as zero.
#[derive(Debug, sqlx::FromRow)]
struct CarRow {
    id: String,
    name: String,
    year: String,
    brand: String,
    fuel_type: String,
    engine_id: String,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[sqlx(default)]
    displacement: Option<i64>,
    #[sqlx(default)]
    no_of_cylinders: Option<i64>,
    #[sqlx(default)]
    car_range: Option<i64>,
}

impl CarRow {
    fn into_car(self) -> DbResult<Car> {
        Ok(Car {
            id: stored_id("id", &self.id)?,
            name: self.name,
            year: self.year,
            brand: self.brand,
            fuel_type: self.fuel_type,
            engine: Engine {
                engine_id: stored_id("engine_id", &self.engine_id)?,
                displacement: self.displacement.unwrap_or(0),
                no_of_cylinders: self.no_of_cylinders.unwrap_or(0),
                car_range: self.car_range.unwrap_or(0),
            },
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Reads the engine row inside the caller's transaction.
async fn engine_in_tx(conn: &mut SqliteConnection, id: Uuid) -> DbResult<Option<Engine>> {
    let row = sqlx::query_as::<_, EngineRow>(
        "SELECT id, displacement, no_of_cylinders, car_range FROM engine WHERE id = ?1",
    )
    .bind(id.to_string())
    .fetch_optional(&mut *conn)
    .await?;

    row.map(EngineRow::into_engine).transpose()
}

async fn car_in_tx(conn: &mut SqliteConnection, id: Uuid) -> DbResult<Option<Car>> {
    let row = sqlx::query_as::<_, CarRow>(&format!("{SELECT_WITH_ENGINE} WHERE c.id = ?1"))
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.map(CarRow::into_car).transpose()
}

/// Repository for car database operations.
///
/// ## Usage
/// ```rust,ignore
/// let cars = db.cars();
/// let ctx = db.request_context();
///
/// let car = cars.create_car(&ctx, &request).await?;
/// let toyotas = cars.get_car_by_brand(&ctx, "Toyota", true).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: SqlitePool,
    verify_engine_on_update: bool,
}

impl CarRepository {
    /// Creates a new CarRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarRepository {
            pool,
            verify_engine_on_update: false,
        }
    }

    /// Also checks the engine reference on update, not just on create.
    pub fn verify_engine_on_update(mut self, verify: bool) -> Self {
        self.verify_engine_on_update = verify;
        self
    }

    async fn require_engine(conn: &mut SqliteConnection, engine_id: Uuid) -> DbResult<Engine> {
        match engine_in_tx(conn, engine_id).await? {
            Some(engine) => Ok(engine),
            None => {
                warn!(engine_id = %engine_id, "Car references a missing engine");
                Err(DbError::missing_reference(ENGINE_ENTITY, engine_id.to_string()))
            }
        }
    }

    async fn fetch(&self, id: Uuid) -> DbResult<Car> {
        let row = sqlx::query_as::<_, CarRow>(&format!("{SELECT_WITH_ENGINE} WHERE c.id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => row.into_car(),
            None => Err(DbError::not_found(ENTITY, id.to_string())),
        }
    }

    async fn fetch_by_brand(&self, brand: &str, include_engine: bool) -> DbResult<Vec<Car>> {
        let base = if include_engine {
            SELECT_WITH_ENGINE
        } else {
            SELECT_BARE
        };

        let rows = sqlx::query_as::<_, CarRow>(&format!("{base} WHERE c.brand = ?1 ORDER BY c.rowid"))
            .bind(brand)
            .fetch_all(&self.pool)
            .await?;

        // One undecodable row fails the whole call.
        let cars = rows
            .into_iter()
            .map(CarRow::into_car)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(brand = %brand, count = cars.len(), "Cars fetched by brand");
        Ok(cars)
    }

    async fn insert(&self, request: &CarRequest) -> DbResult<Car> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let engine = Self::require_engine(&mut tx, request.engine.engine_id).await?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO car (id, name, year, brand, fuel_type, engine_id, price, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(&request.year)
        .bind(&request.brand)
        .bind(&request.fuel_type)
        .bind(engine.engine_id.to_string())
        .bind(request.price)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(car_id = %id, engine_id = %engine.engine_id, "Car created");

        Ok(Car {
            id,
            name: request.name.clone(),
            year: request.year.clone(),
            brand: request.brand.clone(),
            fuel_type: request.fuel_type.clone(),
            engine,
            price: request.price,
            created_at: now,
            updated_at: now,
        })
    }

    async fn replace(&self, id: Uuid, request: &CarRequest) -> DbResult<Car> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        if self.verify_engine_on_update {
            Self::require_engine(&mut tx, request.engine.engine_id).await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE car
            SET name = ?2, year = ?3, brand = ?4, fuel_type = ?5,
                engine_id = ?6, price = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(&request.year)
        .bind(&request.brand)
        .bind(&request.fuel_type)
        .bind(request.engine.engine_id.to_string())
        .bind(request.price)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id.to_string()));
        }

        let car = car_in_tx(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id.to_string()))?;

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(car_id = %id, "Car updated");
        Ok(car)
    }

    async fn remove(&self, id: Uuid) -> DbResult<Car> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let Some(car) = car_in_tx(&mut tx, id).await? else {
            return Err(DbError::not_found(ENTITY, id.to_string()));
        };

        let result = sqlx::query("DELETE FROM car WHERE id = ?1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id.to_string()));
        }

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(car_id = %id, "Car deleted");
        Ok(car)
    }
}

#[async_trait]
impl CarStore for CarRepository {
    async fn get_car_by_id(&self, ctx: &RequestContext, id: &str) -> DbResult<Car> {
        let id = parse_id(ENTITY, id)?;
        ctx.run(self.fetch(id)).await
    }

    async fn get_car_by_brand(
        &self,
        ctx: &RequestContext,
        brand: &str,
        include_engine: bool,
    ) -> DbResult<Vec<Car>> {
        ctx.run(self.fetch_by_brand(brand, include_engine)).await
    }

    async fn create_car(&self, ctx: &RequestContext, request: &CarRequest) -> DbResult<Car> {
        ctx.run(self.insert(request)).await
    }

    async fn update_car(&self, ctx: &RequestContext, id: &str, request: &CarRequest) -> DbResult<Car> {
        let id = parse_id(ENTITY, id)?;
        ctx.run(self.replace(id, request)).await
    }

    async fn delete_car(&self, ctx: &RequestContext, id: &str) -> DbResult<Car> {
        let id = parse_id(ENTITY, id)?;
        ctx.run(self.remove(id)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::error::ErrorKind;
    use crate::pool::Database;
    use crate::store::EngineStore;
    use fleet_core::EngineRequest;

    async fn setup() -> (Database, Engine) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let engine = db
            .engines()
            .create_engine(
                &RequestContext::background(),
                &EngineRequest {
                    displacement: 1800,
                    no_of_cylinders: 4,
                    car_range: 700,
                },
            )
            .await
            .unwrap();
        (db, engine)
    }

    fn corolla(engine_id: Uuid) -> CarRequest {
        CarRequest {
            name: "Corolla".to_string(),
            year: "2020".to_string(),
            brand: "Toyota".to_string(),
            fuel_type: "Hybrid".to_string(),
            engine: Engine::reference(engine_id),
            price: 21_000.0,
        }
    }

    #[tokio::test]
    async fn test_create_embeds_persisted_engine() {
        let (db, engine) = setup().await;
        let ctx = RequestContext::background();

        // Only the id is supplied; the stored numbers come back.
        let car = db.cars().create_car(&ctx, &corolla(engine.engine_id)).await.unwrap();

        assert_eq!(car.engine, engine);
        assert_eq!(car.created_at, car.updated_at);
        assert_eq!(db.cars().get_car_by_id(&ctx, &car.id.to_string()).await.unwrap(), car);
    }

    #[tokio::test]
    async fn test_create_with_unknown_engine_fails() {
        let (db, _engine) = setup().await;
        let ctx = RequestContext::background();
        let missing = Uuid::new_v4();

        let err = db.cars().create_car(&ctx, &corolla(missing)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferentialIntegrity);
        assert!(err.to_string().contains(&missing.to_string()));

        let cars = db.cars().get_car_by_brand(&ctx, "Toyota", false).await.unwrap();
        assert!(cars.is_empty());
    }

    #[tokio::test]
    async fn test_bare_brand_query_leaves_engine_numbers_zero() {
        let (db, engine) = setup().await;
        let ctx = RequestContext::background();
        db.cars().create_car(&ctx, &corolla(engine.engine_id)).await.unwrap();

        let cars = db.cars().get_car_by_brand(&ctx, "Toyota", false).await.unwrap();

        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].engine, Engine::reference(engine.engine_id));
    }

    #[tokio::test]
    async fn test_brand_match_is_exact() {
        let (db, engine) = setup().await;
        let ctx = RequestContext::background();
        db.cars().create_car(&ctx, &corolla(engine.engine_id)).await.unwrap();

        for brand in ["toyota", "Toyo", "Toyota ", ""] {
            let cars = db.cars().get_car_by_brand(&ctx, brand, true).await.unwrap();
            assert!(cars.is_empty(), "{brand:?}");
        }
    }

    #[tokio::test]
    async fn test_update_ignores_engine_existence_by_default() {
        let (db, engine) = setup().await;
        let ctx = RequestContext::background();
        let car = db.cars().create_car(&ctx, &corolla(engine.engine_id)).await.unwrap();

        let missing = Uuid::new_v4();
        let updated = db
            .cars()
            .update_car(&ctx, &car.id.to_string(), &corolla(missing))
            .await
            .unwrap();

        assert_eq!(updated.engine, Engine::reference(missing));
    }

    #[tokio::test]
    async fn test_update_verifies_engine_when_enabled() {
        let (db, engine) = setup().await;
        let ctx = RequestContext::background();
        let cars = db.cars().verify_engine_on_update(true);
        let car = cars.create_car(&ctx, &corolla(engine.engine_id)).await.unwrap();

        let err = cars
            .update_car(&ctx, &car.id.to_string(), &corolla(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferentialIntegrity);

        let unchanged = cars.get_car_by_id(&ctx, &car.id.to_string()).await.unwrap();
        assert_eq!(unchanged, car);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (db, _engine) = setup().await;
        let ctx = RequestContext::background();

        let err = db
            .cars()
            .delete_car(&ctx, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
