use crate::models::normalize_code;
use crate::utils::error::AppResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow, Validate)]
pub struct Airport {
    #[validate(length(min = 1, max = 8, message = "invalid airport code"))]
    pub code: String,
    #[validate(length(min = 1, max = 128, message = "invalid airport city"))]
    pub city: String,
}

impl Airport {
    pub fn new(code: &str, city: &str) -> Self {
        let mut airport = Airport {
            code: code.to_string(),
            city: city.to_string(),
        };
        airport.normalize();
        airport
    }

    pub fn normalize(&mut self) {
        self.code = normalize_code(&self.code);
        self.city = self.city.trim().to_string();
    }

    pub fn check(&self) -> AppResult<()> {
        Ok(self.validate()?)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AirportRequest {
    pub code: String,
    pub city: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AirportCityUpdate {
    pub city: String,
}
