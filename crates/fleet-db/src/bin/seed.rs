//! # Seed Data Generator
//!
//! Populates the database with engines and cars for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 cars (default)
//! cargo run -p fleet-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p fleet-db --bin seed -- --count 1000
//!
//! # Specify database path (otherwise FLEET_DATABASE_PATH or ./fleet.db)
//! cargo run -p fleet-db --bin seed -- --db ./data/fleet.db
//! ```
//!
//! ## Generated Cars
//! Cycles through a fixed catalogue of brands and models. Every car gets its
//! own engine row (1.5L - 4.4L, 3 - 8 cylinders, 450 - 849 range), and the
//! car request carries that engine in full, the same shape the car service
//! accepts.
//!
//! Log level follows `RUST_LOG` (default `info`).

use std::env;
use std::time::Instant;

use fleet_core::{CarRequest, Engine, EngineRequest, FuelType};
use fleet_db::{CarStore, Database, DbConfig, EngineStore, RequestContext};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Brand catalogue: (brand, [(model, fuel type, base price)])
const CATALOGUE: &[(&str, &[(&str, FuelType, f64)])] = &[
    (
        "Toyota",
        &[
            ("Corolla", FuelType::Hybrid, 21_000.0),
            ("Camry", FuelType::Petrol, 26_000.0),
            ("Prius", FuelType::Hybrid, 25_000.0),
            ("Hilux", FuelType::Diesel, 32_000.0),
        ],
    ),
    (
        "Honda",
        &[
            ("Civic", FuelType::Petrol, 23_000.0),
            ("Accord", FuelType::Hybrid, 28_000.0),
            ("e", FuelType::Electric, 34_000.0),
        ],
    ),
    (
        "Tesla",
        &[
            ("Model 3", FuelType::Electric, 40_000.0),
            ("Model Y", FuelType::Electric, 45_000.0),
        ],
    ),
    (
        "Volkswagen",
        &[
            ("Golf", FuelType::Petrol, 24_000.0),
            ("Passat", FuelType::Diesel, 30_000.0),
            ("ID.4", FuelType::Electric, 41_000.0),
        ],
    ),
    (
        "Ford",
        &[
            ("Focus", FuelType::Petrol, 20_000.0),
            ("Ranger", FuelType::Diesel, 33_000.0),
            ("Mustang", FuelType::Petrol, 38_000.0),
        ],
    ),
];

const DEFAULT_COUNT: usize = 200;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = parse_count(&args[i + 1]);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fleet Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of cars to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: $FLEET_DATABASE_PATH or ./fleet.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = DbConfig::from_env()?;
    if let Some(path) = db_path {
        config.database_path = path.into();
    }

    info!(path = %config.database_path.display(), count, "Seeding fleet database");

    let db = Database::new(config).await?;
    let engines = db.engines();
    let cars = db.cars();
    let ctx = RequestContext::background();

    // Any car under a catalogue brand means a previous run already seeded.
    for (brand, _) in CATALOGUE {
        let existing = cars.get_car_by_brand(&ctx, brand, false).await?;
        if !existing.is_empty() {
            warn!(
                brand = %brand,
                existing = existing.len(),
                "Database already has cars; skipping seed to avoid duplicates"
            );
            return Ok(());
        }
    }

    let models: Vec<(&str, &str, FuelType, f64)> = CATALOGUE
        .iter()
        .flat_map(|(brand, models)| {
            models
                .iter()
                .map(move |(model, fuel, price)| (*brand, *model, *fuel, *price))
        })
        .collect();

    let start = Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let (brand, model, fuel, base_price) = models[seed % models.len()];

        let engine = match engines.create_engine(&ctx, &engine_for(seed)).await {
            Ok(engine) => engine,
            Err(e) => {
                error!(brand = %brand, model = %model, error = %e, "Failed to create engine");
                continue;
            }
        };

        let request = car_for(brand, model, fuel, base_price, engine, seed);
        if let Err(e) = cars.create_car(&ctx, &request).await {
            error!(brand = %brand, model = %model, error = %e, "Failed to create car");
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            info!(generated, "Progress");
        }
    }

    let elapsed = start.elapsed();
    info!(
        generated,
        elapsed_ms = elapsed.as_millis() as u64,
        rate = %format!("{:.0} cars/second", generated as f64 / elapsed.as_secs_f64()),
        "Seed complete"
    );

    for (brand, _) in CATALOGUE {
        let seeded = cars.get_car_by_brand(&ctx, brand, true).await?;
        info!(brand = %brand, cars = seeded.len(), "Brand summary");
    }

    db.close().await;
    Ok(())
}

/// Reads a `--count` value, falling back to the default with a warning.
fn parse_count(raw: &str) -> usize {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!(value = %raw, default = DEFAULT_COUNT, "Invalid --count; using default");
            DEFAULT_COUNT
        }
    }
}

/// Engine varied by `seed`; every field is positive.
fn engine_for(seed: usize) -> EngineRequest {
    let seed = seed as i64;
    let cylinders = 3 + seed % 6;
    EngineRequest {
        displacement: cylinders * 500 + (seed * 7) % 400,
        no_of_cylinders: cylinders,
        car_range: 450 + (seed * 11) % 400,
    }
}

/// Car of the given model with a year between 2005 and 2024.
fn car_for(
    brand: &str,
    model: &str,
    fuel: FuelType,
    base_price: f64,
    engine: Engine,
    seed: usize,
) -> CarRequest {
    let year = 2005 + (seed % 20);
    // Older cars are cheaper: 3% off per year before 2024.
    let age = (2024 - year) as f64;
    let price = (base_price * (1.0 - 0.03 * age)).max(1_000.0).round();

    CarRequest {
        name: model.to_string(),
        year: year.to_string(),
        brand: brand.to_string(),
        fuel_type: fuel.to_string(),
        engine,
        price,
    }
}
