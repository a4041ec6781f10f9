//! Store doubles that record how often they were reached.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use fleet_core::{Car, CarRequest, Engine, EngineRequest};
use fleet_db::{CarStore, DbError, DbResult, EngineStore, RequestContext};
use uuid::Uuid;

/// Answers every call with a fixed engine, or `NotFound` when `missing`.
#[derive(Default)]
pub struct CountingEngineStore {
    pub calls: AtomicUsize,
    pub missing: bool,
}

impl CountingEngineStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, request: Option<&EngineRequest>) -> DbResult<Engine> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.missing {
            return Err(DbError::not_found("Engine", "missing"));
        }
        let request = request.copied().unwrap_or(EngineRequest {
            displacement: 1,
            no_of_cylinders: 1,
            car_range: 1,
        });
        Ok(Engine {
            engine_id: Uuid::new_v4(),
            displacement: request.displacement,
            no_of_cylinders: request.no_of_cylinders,
            car_range: request.car_range,
        })
    }
}

#[async_trait]
impl EngineStore for CountingEngineStore {
    async fn create_engine(&self, _ctx: &RequestContext, request: &EngineRequest) -> DbResult<Engine> {
        self.answer(Some(request))
    }

    async fn get_engine_by_id(&self, _ctx: &RequestContext, _id: &str) -> DbResult<Engine> {
        self.answer(None)
    }

    async fn update_engine(
        &self,
        _ctx: &RequestContext,
        _id: &str,
        request: &EngineRequest,
    ) -> DbResult<Engine> {
        self.answer(Some(request))
    }

    async fn delete_engine(&self, _ctx: &RequestContext, _id: &str) -> DbResult<Engine> {
        self.answer(None)
    }
}

/// Builds cars straight from the request; never touches storage.
#[derive(Default)]
pub struct CountingCarStore {
    pub calls: AtomicUsize,
}

impl CountingCarStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, request: &CarRequest) -> Car {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        Car {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            year: request.year.clone(),
            brand: request.brand.clone(),
            fuel_type: request.fuel_type.clone(),
            engine: request.engine,
            price: request.price,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn valid_car_request() -> CarRequest {
    CarRequest {
        name: "Civic".to_string(),
        year: "2018".to_string(),
        brand: "Honda".to_string(),
        fuel_type: "Petrol".to_string(),
        engine: Engine {
            engine_id: Uuid::new_v4(),
            displacement: 1500,
            no_of_cylinders: 4,
            car_range: 650,
        },
        price: 19_000.0,
    }
}

#[async_trait]
impl CarStore for CountingCarStore {
    async fn get_car_by_id(&self, _ctx: &RequestContext, _id: &str) -> DbResult<Car> {
        Ok(self.answer(&valid_car_request()))
    }

    async fn get_car_by_brand(
        &self,
        _ctx: &RequestContext,
        brand: &str,
        _include_engine: bool,
    ) -> DbResult<Vec<Car>> {
        let mut request = valid_car_request();
        request.brand = brand.to_string();
        Ok(vec![self.answer(&request)])
    }

    async fn create_car(&self, _ctx: &RequestContext, request: &CarRequest) -> DbResult<Car> {
        Ok(self.answer(request))
    }

    async fn update_car(&self, _ctx: &RequestContext, _id: &str, request: &CarRequest) -> DbResult<Car> {
        Ok(self.answer(request))
    }

    async fn delete_car(&self, _ctx: &RequestContext, _id: &str) -> DbResult<Car> {
        Ok(self.answer(&valid_car_request()))
    }
}
