//! Storage contracts consumed by the services.
//!
//! Adapters report a missing row as `AppError::NotFound` and a duplicate key as
//! `AppError::Conflict`. Any other store failure is passed through as
//! `AppError::DatabaseError`. List operations return rows in an order the store
//! defines, and callers must not rely on it.

pub mod memory;
pub mod mysql;
pub mod pager;

use crate::models::airplane::Airplane;
use crate::models::airport::Airport;
use crate::models::booking::Booking;
use crate::models::route::Route;
use crate::models::schedule::FlightSchedule;
use crate::utils::error::AppResult;
use async_trait::async_trait;

/// Builds the booking to insert from the confirmed count observed under the
/// schedule lock. Returning an error aborts the reservation without writing.
pub type SeatAssigner<'a> = dyn Fn(i64) -> AppResult<Booking> + Send + Sync + 'a;

#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn create(&self, airport: &Airport) -> AppResult<()>;
    async fn get_by_code(&self, code: &str) -> AppResult<Airport>;
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airport>>;
    async fn update(&self, code: &str, city: &str) -> AppResult<()>;
    async fn delete(&self, code: &str) -> AppResult<()>;
}

#[async_trait]
pub trait AirplaneRepository: Send + Sync {
    async fn create(&self, airplane: &Airplane) -> AppResult<()>;
    async fn get_by_code(&self, code: &str) -> AppResult<Airplane>;
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airplane>>;
    async fn update_seats(&self, code: &str, seat_capacity: i32) -> AppResult<()>;
    async fn delete(&self, code: &str) -> AppResult<()>;
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn create(&self, route: &Route) -> AppResult<()>;
    async fn get_by_code(&self, code: &str) -> AppResult<Route>;
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Route>>;
    async fn delete(&self, code: &str) -> AppResult<()>;
}

#[async_trait]
pub trait FlightScheduleRepository: Send + Sync {
    /// Stores the schedule and returns it with its assigned id.
    async fn create(&self, schedule: FlightSchedule) -> AppResult<FlightSchedule>;
    async fn get_by_id(&self, id: i64) -> AppResult<FlightSchedule>;
    /// Lists schedules of one route, or of every route when `route_code` is `None`.
    async fn list(&self, route_code: Option<&str>, limit: i64, offset: i64) -> AppResult<Vec<FlightSchedule>>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Plain insert with no capacity check. Seat allocation goes through `reserve_seat`.
    async fn create(&self, booking: Booking) -> AppResult<Booking>;
    /// Number of CONFIRMED bookings on the schedule.
    async fn count_by_schedule(&self, schedule_id: i64) -> AppResult<i64>;
    async fn list_by_schedule(&self, schedule_id: i64, limit: i64, offset: i64) -> AppResult<Vec<Booking>>;
    async fn get_by_reference(&self, reference: &str) -> AppResult<Booking>;
    /// Counts and inserts as one unit. No other reservation on the same
    /// schedule can observe the count between `assign` and the insert.
    async fn reserve_seat(&self, schedule_id: i64, assign: &SeatAssigner<'_>) -> AppResult<Booking>;
}

#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Round-trips a trivial query to prove the store is reachable.
    async fn ping(&self) -> AppResult<()>;
}
