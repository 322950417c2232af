use crate::models::airplane::Airplane;
use crate::models::airport::Airport;
use crate::models::booking::Booking;
use crate::models::route::Route;
use crate::models::schedule::FlightSchedule;
use crate::repositories::{
    AirplaneRepository, AirportRepository, BookingRepository, FlightScheduleRepository,
    HealthRepository, RouteRepository, SeatAssigner,
};
use crate::utils::error::{classify_write, AppError, AppResult};
use async_trait::async_trait;
use sqlx::{Executor, MySql, MySqlPool};

const BOOKING_COLUMNS: &str =
    "id, reference, schedule_id, passenger_name, seat_number, status, created_at";
const SCHEDULE_COLUMNS: &str = "id, route_code, airplane_code, departure_date, created_at";

/// sqlx adapter for every repository contract, backed by one MySQL pool.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }

    fn conflict(message: &str) -> AppError {
        AppError::Conflict(message.to_string())
    }

    async fn insert_booking<'e, E>(executor: E, booking: &Booking) -> AppResult<i64>
    where
        E: Executor<'e, Database = MySql>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings (reference, schedule_id, passenger_name, seat_number, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.reference)
        .bind(booking.schedule_id)
        .bind(&booking.passenger_name)
        .bind(booking.seat_number)
        .bind(booking.status.to_string())
        .bind(booking.created_at)
        .execute(executor)
        .await
        .map_err(|e| {
            // reference and (schedule_id, seat_number) are the only unique keys
            classify_write(
                e,
                Self::conflict("Booking already exists"),
                AppError::not_found("Schedule not found"),
            )
        })?;

        Ok(result.last_insert_id() as i64)
    }
}

#[async_trait]
impl AirportRepository for MySqlStore {
    async fn create(&self, airport: &Airport) -> AppResult<()> {
        sqlx::query("INSERT INTO airports (code, city) VALUES (?, ?)")
            .bind(&airport.code)
            .bind(&airport.city)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Airport already exists"),
                    AppError::not_found("Airport not found"),
                )
            })?;
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Airport> {
        sqlx::query_as::<_, Airport>("SELECT code, city FROM airports WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Airport not found"))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airport>> {
        let airports = sqlx::query_as::<_, Airport>(
            "SELECT code, city FROM airports ORDER BY code LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(airports)
    }

    async fn update(&self, code: &str, city: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE airports SET city = ? WHERE code = ?")
            .bind(city)
            .bind(code)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Airport not found"));
        }
        Ok(())
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM airports WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Airport already exists"),
                    Self::conflict("Airport is still referenced by a route"),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Airport not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl AirplaneRepository for MySqlStore {
    async fn create(&self, airplane: &Airplane) -> AppResult<()> {
        sqlx::query("INSERT INTO airplanes (code, seat_capacity) VALUES (?, ?)")
            .bind(&airplane.code)
            .bind(airplane.seat_capacity)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Airplane already exists"),
                    AppError::not_found("Airplane not found"),
                )
            })?;
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Airplane> {
        sqlx::query_as::<_, Airplane>("SELECT code, seat_capacity FROM airplanes WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Airplane not found"))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airplane>> {
        let airplanes = sqlx::query_as::<_, Airplane>(
            "SELECT code, seat_capacity FROM airplanes ORDER BY code LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(airplanes)
    }

    async fn update_seats(&self, code: &str, seat_capacity: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE airplanes SET seat_capacity = ? WHERE code = ?")
            .bind(seat_capacity)
            .bind(code)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Airplane not found"));
        }
        Ok(())
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM airplanes WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Airplane already exists"),
                    Self::conflict("Airplane is still referenced by a schedule"),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Airplane not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl RouteRepository for MySqlStore {
    async fn create(&self, route: &Route) -> AppResult<()> {
        sqlx::query("INSERT INTO routes (code, origin_code, destination_code) VALUES (?, ?, ?)")
            .bind(&route.code)
            .bind(&route.origin_code)
            .bind(&route.destination_code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Route already exists"),
                    AppError::not_found("Airport not found"),
                )
            })?;
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            "SELECT code, origin_code, destination_code FROM routes WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Route not found"))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>(
            "SELECT code, origin_code, destination_code FROM routes ORDER BY code LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(routes)
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Route already exists"),
                    Self::conflict("Route is still referenced by a schedule"),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Route not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl FlightScheduleRepository for MySqlStore {
    async fn create(&self, mut schedule: FlightSchedule) -> AppResult<FlightSchedule> {
        let result = sqlx::query(
            r#"
            INSERT INTO flight_schedules (route_code, airplane_code, departure_date, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&schedule.route_code)
        .bind(&schedule.airplane_code)
        .bind(schedule.departure_date)
        .bind(schedule.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                Self::conflict("Schedule already exists"),
                AppError::not_found("Route or airplane not found"),
            )
        })?;

        schedule.id = result.last_insert_id() as i64;
        Ok(schedule)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<FlightSchedule> {
        sqlx::query_as::<_, FlightSchedule>(&format!(
            "SELECT {} FROM flight_schedules WHERE id = ?",
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Schedule not found"))
    }

    async fn list(&self, route_code: Option<&str>, limit: i64, offset: i64) -> AppResult<Vec<FlightSchedule>> {
        let schedules = match route_code {
            Some(code) => {
                sqlx::query_as::<_, FlightSchedule>(&format!(
                    "SELECT {} FROM flight_schedules WHERE route_code = ? \
                     ORDER BY departure_date, id LIMIT ? OFFSET ?",
                    SCHEDULE_COLUMNS
                ))
                .bind(code)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, FlightSchedule>(&format!(
                    "SELECT {} FROM flight_schedules ORDER BY departure_date, id LIMIT ? OFFSET ?",
                    SCHEDULE_COLUMNS
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(schedules)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM flight_schedules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_write(
                    e,
                    Self::conflict("Schedule already exists"),
                    Self::conflict("Schedule is still referenced by a booking"),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Schedule not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MySqlStore {
    async fn create(&self, mut booking: Booking) -> AppResult<Booking> {
        booking.id = Self::insert_booking(&self.pool, &booking).await?;
        Ok(booking)
    }

    async fn count_by_schedule(&self, schedule_id: i64) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE schedule_id = ? AND status = 'CONFIRMED'",
        )
        .bind(schedule_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn list_by_schedule(&self, schedule_id: i64, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings WHERE schedule_id = ? ORDER BY seat_number LIMIT ? OFFSET ?",
            BOOKING_COLUMNS
        ))
        .bind(schedule_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn get_by_reference(&self, reference: &str) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings WHERE reference = ?",
            BOOKING_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    async fn reserve_seat(&self, schedule_id: i64, assign: &SeatAssigner<'_>) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        // Lock the schedule row so concurrent reservations on it queue up here
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM flight_schedules WHERE id = ? FOR UPDATE")
            .bind(schedule_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::not_found("Schedule not found"));
        }

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE schedule_id = ? AND status = 'CONFIRMED'",
        )
        .bind(schedule_id)
        .fetch_one(&mut *tx)
        .await?;

        // Dropping tx without commit rolls back
        let mut booking = assign(count)?;
        booking.id = Self::insert_booking(&mut *tx, &booking).await?;

        tx.commit().await?;
        Ok(booking)
    }
}

#[async_trait]
impl HealthRepository for MySqlStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
