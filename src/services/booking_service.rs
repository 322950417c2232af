use crate::models::booking::Booking;
use crate::repositories::{AirplaneRepository, BookingRepository, FlightScheduleRepository};
use crate::services::reference::ReferenceGenerator;
use crate::services::{checked_code, page_bounds, within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Seat allocation and booking lookups.
///
/// Every booking goes through `BookingRepository::reserve_seat`, so reading
/// the confirmed count and inserting the new row happen as one unit per
/// schedule. Concurrent callers cannot oversell a schedule or share a seat.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    schedules: Arc<dyn FlightScheduleRepository>,
    airplanes: Arc<dyn AirplaneRepository>,
    references: Arc<dyn ReferenceGenerator>,
    timeout: Duration,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        schedules: Arc<dyn FlightScheduleRepository>,
        airplanes: Arc<dyn AirplaneRepository>,
        references: Arc<dyn ReferenceGenerator>,
    ) -> Self {
        BookingService {
            bookings,
            schedules,
            airplanes,
            references,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Book the next free seat on a schedule for a passenger.
    pub async fn create_booking(&self, schedule_id: i64, passenger_name: &str) -> AppResult<Booking> {
        if schedule_id <= 0 {
            return Err(AppError::validation("invalid schedule id"));
        }
        if passenger_name.trim().is_empty() {
            return Err(AppError::validation("invalid passenger name"));
        }

        within(self.timeout, self.allocate(schedule_id, passenger_name)).await
    }

    async fn allocate(&self, schedule_id: i64, passenger_name: &str) -> AppResult<Booking> {
        let schedule = self.schedules.get_by_id(schedule_id).await?;
        let airplane = self.airplanes.get_by_code(&schedule.airplane_code).await?;
        if airplane.seat_capacity <= 0 {
            return Err(AppError::validation("invalid seat capacity"));
        }
        let capacity = i64::from(airplane.seat_capacity);
        let references = &self.references;

        // Runs with the schedule locked, `count` is the confirmed count under that lock
        let assign = move |count: i64| -> AppResult<Booking> {
            if count >= capacity {
                return Err(AppError::FlightFull);
            }
            let seat_number =
                i32::try_from(count + 1).map_err(|_| AppError::validation("invalid seat number"))?;
            let booking = Booking::confirmed(&references.generate(), schedule_id, passenger_name, seat_number);
            booking.check()?;
            Ok(booking)
        };

        match self.bookings.reserve_seat(schedule_id, &assign).await {
            Ok(booking) => {
                tracing::info!(
                    schedule_id,
                    seat = booking.seat_number,
                    reference = %booking.reference,
                    "booking confirmed"
                );
                Ok(booking)
            }
            Err(AppError::FlightFull) => {
                tracing::warn!(schedule_id, capacity, "booking rejected, flight is full");
                Err(AppError::FlightFull)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        let reference = checked_code(reference, 6, 32, "invalid booking reference")?;
        within(self.timeout, self.bookings.get_by_reference(&reference)).await
    }

    pub async fn list_by_schedule(&self, schedule_id: i64, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        if schedule_id <= 0 {
            return Err(AppError::validation("invalid schedule id"));
        }
        let (limit, offset) = page_bounds(limit, offset);

        within(self.timeout, async {
            self.schedules.get_by_id(schedule_id).await?;
            self.bookings.list_by_schedule(schedule_id, limit, offset).await
        })
        .await
    }
}
