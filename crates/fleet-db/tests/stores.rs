//! End-to-end store behaviour against a migrated in-memory database.

use std::time::Duration;

use fleet_core::{Car, CarRequest, Engine, EngineRequest};
use fleet_db::{
    migrations, CarStore, Database, DbConfig, EngineStore, ErrorKind, RequestContext,
};
use uuid::Uuid;

async fn setup() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn count(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .unwrap()
}

async fn engine(db: &Database, displacement: i64) -> Engine {
    db.engines()
        .create_engine(
            &RequestContext::background(),
            &EngineRequest {
                displacement,
                no_of_cylinders: 4,
                car_range: 600,
            },
        )
        .await
        .unwrap()
}

fn car_request(name: &str, brand: &str, engine: Engine) -> CarRequest {
    CarRequest {
        name: name.to_string(),
        year: "2019".to_string(),
        brand: brand.to_string(),
        fuel_type: "Petrol".to_string(),
        engine,
        price: 18_500.0,
    }
}

async fn car(db: &Database, name: &str, brand: &str, engine: Engine) -> Car {
    db.cars()
        .create_car(&RequestContext::background(), &car_request(name, brand, engine))
        .await
        .unwrap()
}

// =============================================================================
// Referential integrity and atomicity
// =============================================================================

#[tokio::test]
async fn test_unknown_engine_writes_no_car() {
    let db = setup().await;
    let ctx = RequestContext::background();

    let err = db
        .cars()
        .create_car(&ctx, &car_request("Civic", "Honda", Engine::reference(Uuid::new_v4())))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ReferentialIntegrity);
    assert_eq!(count(&db, "car").await, 0);
}

#[tokio::test]
async fn test_failure_after_engine_check_rolls_back() {
    let db = setup().await;
    let engine = engine(&db, 1500).await;

    sqlx::query(
        "CREATE TRIGGER fail_car_insert AFTER INSERT ON car \
         BEGIN SELECT RAISE(ABORT, 'simulated failure'); END;",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let err = db
        .cars()
        .create_car(&RequestContext::background(), &car_request("Civic", "Honda", engine))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert_eq!(count(&db, "car").await, 0);
    // The engine row predates the failed call and is untouched.
    assert_eq!(count(&db, "engine").await, 1);
}

// =============================================================================
// Round trip and update semantics
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let db = setup().await;
    let ctx = RequestContext::background();
    let engine = engine(&db, 2000).await;

    let created = car(&db, "Camry", "Toyota", engine).await;
    let fetched = db
        .cars()
        .get_car_by_id(&ctx, &created.id.to_string())
        .await
        .unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.created_at, fetched.updated_at);
    assert_eq!(fetched.engine, engine);
}

#[tokio::test]
async fn test_update_changes_only_targeted_fields() {
    let db = setup().await;
    let ctx = RequestContext::background();
    let first = engine(&db, 2000).await;
    let second = engine(&db, 3000).await;
    let created = car(&db, "Camry", "Toyota", first).await;

    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut request = car_request("Camry", "Toyota", second);
    request.price = 17_250.0;
    let updated = db
        .cars()
        .update_car(&ctx, &created.id.to_string(), &request)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.year, created.year);
    assert_eq!(updated.price, 17_250.0);
    assert_eq!(updated.engine, second);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let fetched = db
        .cars()
        .get_car_by_id(&ctx, &created.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched, updated);
}

// =============================================================================
// Not found and identifiers
// =============================================================================

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let db = setup().await;
    let ctx = RequestContext::background();
    let engine = engine(&db, 1000).await;
    let id = Uuid::new_v4().to_string();
    let engine_request = EngineRequest {
        displacement: 1000,
        no_of_cylinders: 3,
        car_range: 500,
    };

    let errors = [
        db.engines().get_engine_by_id(&ctx, &id).await.unwrap_err(),
        db.engines()
            .update_engine(&ctx, &id, &engine_request)
            .await
            .unwrap_err(),
        db.engines().delete_engine(&ctx, &id).await.unwrap_err(),
        db.cars().get_car_by_id(&ctx, &id).await.unwrap_err(),
        db.cars()
            .update_car(&ctx, &id, &car_request("Up", "Volkswagen", engine))
            .await
            .unwrap_err(),
        db.cars().delete_car(&ctx, &id).await.unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.kind(), ErrorKind::NotFound, "{err}");
    }
}

#[tokio::test]
async fn test_delete_twice() {
    let db = setup().await;
    let ctx = RequestContext::background();
    let engine = engine(&db, 1200).await;
    let created = car(&db, "Fiesta", "Ford", engine).await;
    let id = created.id.to_string();

    let deleted = db.cars().delete_car(&ctx, &id).await.unwrap();
    assert_eq!(deleted, created);

    let err = db.cars().delete_car(&ctx, &id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_malformed_ids_rejected_before_query() {
    let db = setup().await;
    let ctx = RequestContext::background();
    let engine = engine(&db, 1200).await;

    // A closed pool would fail any query; the id check runs first.
    db.close().await;

    let real = engine.engine_id;
    let ids = [
        String::new(),
        "abc".to_string(),
        "1234".to_string(),
        "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz".to_string(),
        // A real id with padding is still rejected.
        format!("  {real}\n"),
        format!(" {real}"),
        format!("{real}\t"),
    ];

    for id in &ids {
        let errors = [
            db.engines().get_engine_by_id(&ctx, id).await.unwrap_err(),
            db.engines().delete_engine(&ctx, id).await.unwrap_err(),
            db.cars().get_car_by_id(&ctx, id).await.unwrap_err(),
            db.cars()
                .update_car(&ctx, id, &car_request("Up", "Volkswagen", engine))
                .await
                .unwrap_err(),
            db.cars().delete_car(&ctx, id).await.unwrap_err(),
        ];

        for err in errors {
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "{id:?}: {err}");
        }
    }
}

// =============================================================================
// Brand filter
// =============================================================================

#[tokio::test]
async fn test_brand_filter_with_dangling_engine() {
    let db = setup().await;
    let ctx = RequestContext::background();

    let e1 = engine(&db, 1800).await;
    let e2 = engine(&db, 2500).await;
    let doomed = engine(&db, 1300).await;
    let e4 = engine(&db, 1500).await;

    let corolla = car(&db, "Corolla", "Toyota", e1).await;
    let camry = car(&db, "Camry", "Toyota", e2).await;
    let yaris = car(&db, "Yaris", "Toyota", doomed).await;
    let civic = car(&db, "Civic", "Honda", e4).await;

    db.engines()
        .delete_engine(&ctx, &doomed.engine_id.to_string())
        .await
        .unwrap();

    let detailed = db.cars().get_car_by_brand(&ctx, "Toyota", true).await.unwrap();
    let ids: Vec<Uuid> = detailed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![corolla.id, camry.id, yaris.id]);
    assert_eq!(detailed[0].engine, e1);
    assert_eq!(detailed[1].engine, e2);
    assert_eq!(detailed[2].engine, Engine::reference(doomed.engine_id));

    let bare = db.cars().get_car_by_brand(&ctx, "Toyota", false).await.unwrap();
    assert_eq!(bare.len(), 3);
    assert_eq!(bare[0].engine, Engine::reference(e1.engine_id));
    assert_eq!(bare[1].engine, Engine::reference(e2.engine_id));
    assert_eq!(bare[2].engine, Engine::reference(doomed.engine_id));

    let hondas = db.cars().get_car_by_brand(&ctx, "Honda", true).await.unwrap();
    assert_eq!(hondas.len(), 1);
    assert_eq!(hondas[0].id, civic.id);
    assert_eq!(hondas[0].engine, e4);

    // The dangling car is still readable on its own.
    let fetched = db
        .cars()
        .get_car_by_id(&ctx, &yaris.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched.engine, Engine::reference(doomed.engine_id));

    let none = db.cars().get_car_by_brand(&ctx, "Lada", true).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_undecodable_row_fails_brand_query() {
    let db = setup().await;
    let ctx = RequestContext::background();
    let engine = engine(&db, 1800).await;
    car(&db, "Corolla", "Toyota", engine).await;

    let now = chrono::Utc::now();
    sqlx::query(
        "INSERT INTO car (id, name, year, brand, fuel_type, engine_id, price, created_at, updated_at) \
         VALUES (?1, 'Broken', '2020', 'Toyota', 'Petrol', 'garbage', 1.0, ?2, ?2)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(now)
    .execute(db.pool())
    .await
    .unwrap();

    for include_engine in [true, false] {
        let err = db
            .cars()
            .get_car_by_brand(&ctx, "Toyota", include_engine)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence, "include_engine={include_engine}");
    }

    // Other brands are unaffected.
    assert!(db.cars().get_car_by_brand(&ctx, "Honda", true).await.unwrap().is_empty());
}

// =============================================================================
// Cancellation and deadlines
// =============================================================================

#[tokio::test]
async fn test_cancelled_context_writes_nothing() {
    let db = setup().await;
    let engine = engine(&db, 1600).await;
    let (ctx, handle) = RequestContext::background().cancellable();
    handle.cancel();

    let err = db
        .cars()
        .create_car(&ctx, &car_request("Golf", "Volkswagen", engine))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(count(&db, "car").await, 0);
}

#[tokio::test]
async fn test_expired_context_writes_nothing() {
    let db = setup().await;
    let ctx = RequestContext::with_timeout(Duration::ZERO);

    let err = db
        .engines()
        .create_engine(
            &ctx,
            &EngineRequest {
                displacement: 1000,
                no_of_cylinders: 3,
                car_range: 500,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(count(&db, "engine").await, 0);
}

#[tokio::test]
async fn test_deadline_during_insert_rolls_back() {
    let db = setup().await;
    let engine = engine(&db, 1600).await;

    // Every car insert cross-joins a 3000-row table with itself.
    sqlx::query("CREATE TABLE filler (n INTEGER NOT NULL)")
        .execute(db.pool())
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO filler (n) \
         WITH RECURSIVE seq(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM seq WHERE i < 3000) \
         SELECT i FROM seq",
    )
    .execute(db.pool())
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER slow_car_insert AFTER INSERT ON car \
         BEGIN SELECT COUNT(*) FROM filler a, filler b; END;",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let ctx = RequestContext::with_timeout(Duration::from_millis(20));
    let err = db
        .cars()
        .create_car(&ctx, &car_request("Golf", "Volkswagen", engine))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);

    // Waits for the abandoned statement and its rollback on the single connection.
    assert_eq!(count(&db, "car").await, 0);
    assert!(db
        .cars()
        .get_car_by_brand(&RequestContext::background(), "Volkswagen", true)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_deadline_while_waiting_for_connection() {
    let db = setup().await;
    let engine = engine(&db, 1600).await;

    // The in-memory pool has a single connection; hold it.
    let held = db.pool().acquire().await.unwrap();

    let ctx = RequestContext::with_timeout(Duration::from_millis(50));
    let err = db
        .cars()
        .create_car(&ctx, &car_request("Golf", "Volkswagen", engine))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);

    drop(held);
    assert_eq!(count(&db, "car").await, 0);
}

// =============================================================================
// Migrations
// =============================================================================

#[tokio::test]
async fn test_migrations_applied_and_idempotent() {
    let db = setup().await;

    let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(applied, 2);

    db.run_migrations().await.unwrap();
    let (_, applied) = migrations::migration_status(db.pool()).await.unwrap();
    assert_eq!(applied, 2);
}
