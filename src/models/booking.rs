use crate::models::normalize_code;
use crate::utils::error::AppResult;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

// Cancelled exists in the data model but no operation produces it yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl TryFrom<String> for BookingStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

/// A seat held by one passenger on one schedule. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema, sqlx::FromRow, Validate)]
pub struct Booking {
    pub id: i64,
    #[validate(length(min = 6, max = 32, message = "invalid booking reference"))]
    pub reference: String,
    #[validate(range(min = 1, message = "invalid schedule id"))]
    pub schedule_id: i64,
    #[validate(length(min = 1, max = 128, message = "invalid passenger name"))]
    pub passenger_name: String,
    #[validate(range(min = 1, message = "invalid seat number"))]
    pub seat_number: i32,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn confirmed(reference: &str, schedule_id: i64, passenger_name: &str, seat_number: i32) -> Self {
        let mut booking = Booking {
            id: 0,
            reference: reference.to_string(),
            schedule_id,
            passenger_name: passenger_name.to_string(),
            seat_number,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };
        booking.normalize();
        booking
    }

    pub fn normalize(&mut self) {
        self.reference = normalize_code(&self.reference);
        self.passenger_name = self.passenger_name.trim().to_string();
    }

    pub fn check(&self) -> AppResult<()> {
        Ok(self.validate()?)
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BookingRequest {
    pub schedule_id: i64,
    pub passenger_name: String,
}
