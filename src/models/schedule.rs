use crate::models::{normalize_code, DATE_FORMAT};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One dated flight of a route, flown by one airplane. The date is a UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow, Validate)]
pub struct FlightSchedule {
    pub id: i64,
    #[validate(length(min = 1, max = 16, message = "invalid schedule route"))]
    pub route_code: String,
    #[validate(length(min = 1, max = 16, message = "invalid schedule airplane"))]
    pub airplane_code: String,
    pub departure_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl FlightSchedule {
    /// Builds an unsaved schedule; the store assigns the id.
    pub fn new(route_code: &str, airplane_code: &str, departure_date: NaiveDate) -> Self {
        let mut schedule = FlightSchedule {
            id: 0,
            route_code: route_code.to_string(),
            airplane_code: airplane_code.to_string(),
            departure_date,
            created_at: Utc::now(),
        };
        schedule.normalize();
        schedule
    }

    pub fn normalize(&mut self) {
        self.route_code = normalize_code(&self.route_code);
        self.airplane_code = normalize_code(&self.airplane_code);
    }

    pub fn check(&self) -> AppResult<()> {
        Ok(self.validate()?)
    }

    pub fn departs_on(&self, date: Option<NaiveDate>) -> bool {
        date.map_or(true, |d| self.departure_date == d)
    }
}

/// Parse a `YYYY-MM-DD` date, rejecting anything else as a validation error.
pub fn parse_departure_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation("invalid departure date"))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScheduleRequest {
    pub route_code: String,
    pub airplane_code: String,
    pub departure_date: String,
}
