#![allow(dead_code)]

use chrono::NaiveDate;
use dotenv::dotenv;
use flight_booking::{
    db,
    models::{booking::Booking, schedule::FlightSchedule},
    repositories::memory::InMemoryStore,
    services::{
        airplane_service::AirplaneService,
        airport_service::AirportService,
        booking_service::BookingService,
        flight_service::FlightService,
        reference::{ReferenceGenerator, SecureReferenceGenerator},
        route_service::RouteService,
        schedule_service::ScheduleService,
    },
    utils::error::AppError,
};
use once_cell::sync::OnceCell;
use sqlx::mysql::MySqlPool as Pool;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::Error;
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

#[allow(unused_macros)]
macro_rules! test_println {
    ($test_name:expr, $($arg:tt)*) => {
        println!("[{}] {}", $test_name, format!($($arg)*))
    };
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

/// Hands out `BK-0000000001`, `BK-0000000002`, ...
#[derive(Default)]
pub struct SequentialReferences {
    next: AtomicU64,
}

impl ReferenceGenerator for SequentialReferences {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("BK-{:010X}", n)
    }
}

/// Every service wired to one shared in-memory store.
pub struct Services {
    pub store: Arc<InMemoryStore>,
    pub airports: AirportService,
    pub airplanes: AirplaneService,
    pub routes: RouteService,
    pub schedules: ScheduleService,
    pub flights: FlightService,
    pub bookings: BookingService,
}

impl Services {
    pub fn in_memory() -> Self {
        Self::with_references(Arc::new(SecureReferenceGenerator))
    }

    pub fn with_references(references: Arc<dyn ReferenceGenerator>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Services {
            airports: AirportService::new(store.clone()),
            airplanes: AirplaneService::new(store.clone()),
            routes: RouteService::new(store.clone(), store.clone()),
            schedules: ScheduleService::new(store.clone(), store.clone(), store.clone()),
            flights: FlightService::new(store.clone(), store.clone(), store.clone(), store.clone()),
            bookings: BookingService::new(store.clone(), store.clone(), store.clone(), references),
            store,
        }
    }

    /// Creates the airports, the airplane and the route if missing, then the schedule.
    pub async fn schedule(
        &self,
        origin: &str,
        destination: &str,
        airplane: &str,
        seats: i32,
        departure_date: &str,
    ) -> Result<FlightSchedule, AppError> {
        for code in [origin, destination] {
            if self.airports.get(code).await.is_err() {
                self.airports.create(code, &format!("{} city", code)).await?;
            }
        }
        if self.airplanes.get(airplane).await.is_err() {
            self.airplanes.create(airplane, seats).await?;
        }
        let route_code = format!("{}-{}", origin, destination);
        if self.routes.get(&route_code).await.is_err() {
            self.routes.create(&route_code, origin, destination).await?;
        }
        self.schedules.create(&route_code, airplane, departure_date).await
    }

    pub async fn book_many(&self, schedule_id: i64, passengers: usize) -> Result<Vec<Booking>, AppError> {
        let mut bookings = Vec::with_capacity(passengers);
        for i in 0..passengers {
            bookings.push(
                self.bookings
                    .create_booking(schedule_id, &format!("Passenger {}", i))
                    .await?,
            );
        }
        Ok(bookings)
    }
}

static TEST_DB: OnceCell<Mutex<Option<TestDb>>> = OnceCell::new();
static DB_NAME: OnceCell<String> = OnceCell::new();

#[derive(Debug)]
pub struct TestDb {
    pub pool: Pool,
    pub db_name: String,
}

// Server URL without the database part, taken from ADMIN_DATABASE_URL
fn admin_base_url() -> String {
    dotenv().ok();
    let db_url = env::var("ADMIN_DATABASE_URL").expect("ADMIN_DATABASE_URL must be set in .env file");
    db_url.split('/').collect::<Vec<&str>>()[..3].join("/")
}

async fn create_connection_pool_without_db() -> Result<Pool, Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&admin_base_url())
        .await
}

async fn create_connection_pool_with_db(db_name: &str) -> Result<Pool, Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&format!("{}/{}", admin_base_url(), db_name))
        .await
}

impl TestDb {
    // One database per test run, shared by every test in the binary
    pub async fn get_instance() -> Result<Pool, Error> {
        let test_db = TEST_DB.get_or_init(|| Mutex::new(None));
        let mut guard = test_db.lock().await;

        if let Some(db) = guard.as_ref() {
            return Ok(db.pool.clone());
        }

        let db = Self::setup_database().await?;
        let pool = db.pool.clone();
        *guard = Some(db);
        Ok(pool)
    }

    async fn setup_database() -> Result<Self, Error> {
        let db_name = DB_NAME
            .get_or_init(|| {
                let timestamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_millis();
                format!("flight_test_{}", timestamp)
            })
            .clone();

        println!("Creating test database: {}", db_name);
        let admin_pool = create_connection_pool_without_db().await?;
        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&admin_pool)
            .await?;

        let pool = create_connection_pool_with_db(&db_name).await?;
        db::migrate(&pool).await?;

        Ok(Self { pool, db_name })
    }

    // Drop the database created for this run, if any
    pub fn cleanup_database_sync() -> Result<(), Error> {
        let Some(db_name) = DB_NAME.get() else {
            return Ok(());
        };
        println!("Dropping test database: {}", db_name);
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let admin_pool = create_connection_pool_without_db().await?;
            sqlx::query(&format!("DROP DATABASE IF EXISTS {}", db_name))
                .execute(&admin_pool)
                .await?;
            Ok::<(), Error>(())
        })
    }
}
