use crate::config::DatabaseConfig;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

// Foreign keys restrict deletes; referenced rows must be removed first
pub const SCHEMA: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS airports (
        code VARCHAR(8) NOT NULL PRIMARY KEY,
        city VARCHAR(128) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS airplanes (
        code VARCHAR(16) NOT NULL PRIMARY KEY,
        seat_capacity INT NOT NULL,
        CONSTRAINT airplanes_seat_capacity_positive CHECK (seat_capacity > 0)
    )",
    "CREATE TABLE IF NOT EXISTS routes (
        code VARCHAR(16) NOT NULL PRIMARY KEY,
        origin_code VARCHAR(8) NOT NULL,
        destination_code VARCHAR(8) NOT NULL,
        CONSTRAINT routes_origin_fk
            FOREIGN KEY (origin_code) REFERENCES airports(code)
            ON DELETE RESTRICT,
        CONSTRAINT routes_destination_fk
            FOREIGN KEY (destination_code) REFERENCES airports(code)
            ON DELETE RESTRICT
    )",
    "CREATE TABLE IF NOT EXISTS flight_schedules (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        route_code VARCHAR(16) NOT NULL,
        airplane_code VARCHAR(16) NOT NULL,
        departure_date DATE NOT NULL,
        created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        INDEX flight_schedules_route_date_idx (route_code, departure_date),
        CONSTRAINT flight_schedules_route_fk
            FOREIGN KEY (route_code) REFERENCES routes(code)
            ON DELETE RESTRICT,
        CONSTRAINT flight_schedules_airplane_fk
            FOREIGN KEY (airplane_code) REFERENCES airplanes(code)
            ON DELETE RESTRICT
    )",
    "CREATE TABLE IF NOT EXISTS bookings (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        reference VARCHAR(32) NOT NULL,
        schedule_id BIGINT NOT NULL,
        passenger_name VARCHAR(128) NOT NULL,
        seat_number INT NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'CONFIRMED',
        created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        CONSTRAINT bookings_reference_uindex UNIQUE (reference),
        CONSTRAINT bookings_schedule_seat_uindex UNIQUE (schedule_id, seat_number),
        CONSTRAINT bookings_schedule_fk
            FOREIGN KEY (schedule_id) REFERENCES flight_schedules(id)
            ON DELETE RESTRICT
    )",
];

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options()?)
            .await?;

        Ok(Database { pool })
    }

    /// Create any missing tables. Safe to run on every start.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        migrate(&self.pool).await
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

pub async fn migrate(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for create_sql in SCHEMA {
        sqlx::query(create_sql).execute(pool).await?;
    }
    tracing::debug!(tables = SCHEMA.len(), "schema is up to date");
    Ok(())
}
