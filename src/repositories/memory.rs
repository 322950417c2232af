//! In-memory implementation of every repository contract.
//!
//! Enforces the same keys and restrict-delete rules as the MySQL schema, so
//! services can be exercised without a database.

use crate::models::airplane::Airplane;
use crate::models::airport::Airport;
use crate::models::booking::Booking;
use crate::models::route::Route;
use crate::models::schedule::FlightSchedule;
use crate::repositories::{
    AirplaneRepository, AirportRepository, BookingRepository, FlightScheduleRepository,
    HealthRepository, RouteRepository, SeatAssigner,
};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    airports: BTreeMap<String, Airport>,
    airplanes: BTreeMap<String, Airplane>,
    routes: BTreeMap<String, Route>,
    schedules: BTreeMap<i64, FlightSchedule>,
    bookings: Vec<Booking>,
    last_schedule_id: i64,
    last_booking_id: i64,
}

impl Tables {
    fn insert_booking(&mut self, mut booking: Booking) -> AppResult<Booking> {
        if !self.schedules.contains_key(&booking.schedule_id) {
            return Err(AppError::not_found("Schedule not found"));
        }
        if self.bookings.iter().any(|b| b.reference == booking.reference) {
            return Err(AppError::Conflict("Booking already exists".into()));
        }
        if self
            .bookings
            .iter()
            .any(|b| b.schedule_id == booking.schedule_id && b.seat_number == booking.seat_number)
        {
            return Err(AppError::Conflict("Seat already taken".into()));
        }
        self.last_booking_id += 1;
        booking.id = self.last_booking_id;
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    fn confirmed_count(&self, schedule_id: i64) -> i64 {
        self.bookings
            .iter()
            .filter(|b| b.schedule_id == schedule_id && b.is_confirmed())
            .count() as i64
    }
}

fn page<'t, T: Clone + 't>(rows: impl Iterator<Item = &'t T>, limit: i64, offset: i64) -> Vec<T> {
    rows.skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::DatabaseError("in-memory store poisoned".into()))
    }
}

#[async_trait]
impl AirportRepository for InMemoryStore {
    async fn create(&self, airport: &Airport) -> AppResult<()> {
        let mut tables = self.lock()?;
        if tables.airports.contains_key(&airport.code) {
            return Err(AppError::Conflict("Airport already exists".into()));
        }
        tables.airports.insert(airport.code.clone(), airport.clone());
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Airport> {
        self.lock()?
            .airports
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found("Airport not found"))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airport>> {
        Ok(page(self.lock()?.airports.values(), limit, offset))
    }

    async fn update(&self, code: &str, city: &str) -> AppResult<()> {
        let mut tables = self.lock()?;
        let airport = tables
            .airports
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Airport not found"))?;
        airport.city = city.to_string();
        Ok(())
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        let mut tables = self.lock()?;
        if !tables.airports.contains_key(code) {
            return Err(AppError::not_found("Airport not found"));
        }
        if tables
            .routes
            .values()
            .any(|r| r.origin_code == code || r.destination_code == code)
        {
            return Err(AppError::Conflict("Airport is still referenced by a route".into()));
        }
        tables.airports.remove(code);
        Ok(())
    }
}

#[async_trait]
impl AirplaneRepository for InMemoryStore {
    async fn create(&self, airplane: &Airplane) -> AppResult<()> {
        let mut tables = self.lock()?;
        if tables.airplanes.contains_key(&airplane.code) {
            return Err(AppError::Conflict("Airplane already exists".into()));
        }
        tables.airplanes.insert(airplane.code.clone(), airplane.clone());
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Airplane> {
        self.lock()?
            .airplanes
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found("Airplane not found"))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airplane>> {
        Ok(page(self.lock()?.airplanes.values(), limit, offset))
    }

    async fn update_seats(&self, code: &str, seat_capacity: i32) -> AppResult<()> {
        let mut tables = self.lock()?;
        let airplane = tables
            .airplanes
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Airplane not found"))?;
        airplane.seat_capacity = seat_capacity;
        Ok(())
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        let mut tables = self.lock()?;
        if !tables.airplanes.contains_key(code) {
            return Err(AppError::not_found("Airplane not found"));
        }
        if tables.schedules.values().any(|s| s.airplane_code == code) {
            return Err(AppError::Conflict("Airplane is still referenced by a schedule".into()));
        }
        tables.airplanes.remove(code);
        Ok(())
    }
}

#[async_trait]
impl RouteRepository for InMemoryStore {
    async fn create(&self, route: &Route) -> AppResult<()> {
        let mut tables = self.lock()?;
        if tables.routes.contains_key(&route.code) {
            return Err(AppError::Conflict("Route already exists".into()));
        }
        if !tables.airports.contains_key(&route.origin_code)
            || !tables.airports.contains_key(&route.destination_code)
        {
            return Err(AppError::not_found("Airport not found"));
        }
        tables.routes.insert(route.code.clone(), route.clone());
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Route> {
        self.lock()?
            .routes
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found("Route not found"))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Route>> {
        Ok(page(self.lock()?.routes.values(), limit, offset))
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        let mut tables = self.lock()?;
        if !tables.routes.contains_key(code) {
            return Err(AppError::not_found("Route not found"));
        }
        if tables.schedules.values().any(|s| s.route_code == code) {
            return Err(AppError::Conflict("Route is still referenced by a schedule".into()));
        }
        tables.routes.remove(code);
        Ok(())
    }
}

#[async_trait]
impl FlightScheduleRepository for InMemoryStore {
    async fn create(&self, mut schedule: FlightSchedule) -> AppResult<FlightSchedule> {
        let mut tables = self.lock()?;
        if !tables.routes.contains_key(&schedule.route_code) {
            return Err(AppError::not_found("Route not found"));
        }
        if !tables.airplanes.contains_key(&schedule.airplane_code) {
            return Err(AppError::not_found("Airplane not found"));
        }
        tables.last_schedule_id += 1;
        schedule.id = tables.last_schedule_id;
        tables.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<FlightSchedule> {
        self.lock()?
            .schedules
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Schedule not found"))
    }

    async fn list(&self, route_code: Option<&str>, limit: i64, offset: i64) -> AppResult<Vec<FlightSchedule>> {
        let tables = self.lock()?;
        let mut rows: Vec<&FlightSchedule> = tables
            .schedules
            .values()
            .filter(|s| route_code.map_or(true, |code| s.route_code == code))
            .collect();
        rows.sort_by_key(|s| (s.departure_date, s.id));
        Ok(page(rows.into_iter(), limit, offset))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tables = self.lock()?;
        if !tables.schedules.contains_key(&id) {
            return Err(AppError::not_found("Schedule not found"));
        }
        if tables.bookings.iter().any(|b| b.schedule_id == id) {
            return Err(AppError::Conflict("Schedule is still referenced by a booking".into()));
        }
        tables.schedules.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create(&self, booking: Booking) -> AppResult<Booking> {
        self.lock()?.insert_booking(booking)
    }

    async fn count_by_schedule(&self, schedule_id: i64) -> AppResult<i64> {
        Ok(self.lock()?.confirmed_count(schedule_id))
    }

    async fn list_by_schedule(&self, schedule_id: i64, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        let tables = self.lock()?;
        let mut rows: Vec<&Booking> = tables
            .bookings
            .iter()
            .filter(|b| b.schedule_id == schedule_id)
            .collect();
        rows.sort_by_key(|b| b.seat_number);
        Ok(page(rows.into_iter(), limit, offset))
    }

    async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        self.lock()?
            .bookings
            .iter()
            .find(|b| b.reference == reference)
            .cloned()
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    async fn reserve_seat(&self, schedule_id: i64, assign: &SeatAssigner<'_>) -> AppResult<Booking> {
        // The guard is held from count to insert
        let mut tables = self.lock()?;
        if !tables.schedules.contains_key(&schedule_id) {
            return Err(AppError::not_found("Schedule not found"));
        }
        let booking = assign(tables.confirmed_count(schedule_id))?;
        tables.insert_booking(booking)
    }
}

#[async_trait]
impl HealthRepository for InMemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.lock().map(|_| ())
    }
}
