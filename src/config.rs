//! Runtime configuration read from the environment (and `.env`, if present).
//!
//! Database settings are read from `FLIGHT_DB_<FIELD>` first and then from the
//! bare `DB_<FIELD>` name. `DATABASE_URL` replaces the individual fields entirely.

use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: String, value: String },

    #[error("db.port out of range: {0}")]
    PortOutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Driver options for the pool. Fields are passed through as-is, so a
    /// password needs no escaping. A configured URL is parsed instead.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }
        Ok(MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Deadline applied to every engine operation.
    pub operation_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let db_field = |field: &str| read(&format!("FLIGHT_DB_{}", field)).or_else(|| read(&format!("DB_{}", field)));

        let port_raw = db_field("PORT").unwrap_or_else(|| "3306".to_string());
        let port = match port_raw.parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => return Err(ConfigError::PortOutOfRange(port_raw)),
        };

        let database = DatabaseConfig {
            url: read("FLIGHT_DB_URL").or_else(|| read("DATABASE_URL")),
            host: db_field("HOST").unwrap_or_else(|| "localhost".to_string()),
            port,
            user: db_field("USER").unwrap_or_else(|| "flight_app".to_string()),
            password: db_field("PASSWORD").unwrap_or_else(|| "app".to_string()),
            name: db_field("NAME").unwrap_or_else(|| "flight".to_string()),
            max_connections: number(&read, "FLIGHT_DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(number(&read, "FLIGHT_DB_ACQUIRE_TIMEOUT_SECS", 3)?),
        };

        Ok(AppConfig {
            database,
            operation_timeout: Duration::from_secs(number(&read, "FLIGHT_OPERATION_TIMEOUT_SECS", 5)?),
        })
    }
}

fn number<T, R>(read: &R, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    R: Fn(&str) -> Option<String>,
{
    match read(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value,
        }),
    }
}
