use crate::models::normalize_code;
use crate::utils::error::AppResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow, Validate)]
pub struct Airplane {
    #[validate(length(min = 1, max = 16, message = "invalid airplane code"))]
    pub code: String,
    #[validate(range(min = 1, message = "invalid seat capacity"))]
    pub seat_capacity: i32,
}

impl Airplane {
    pub fn new(code: &str, seat_capacity: i32) -> Self {
        let mut airplane = Airplane {
            code: code.to_string(),
            seat_capacity,
        };
        airplane.normalize();
        airplane
    }

    pub fn normalize(&mut self) {
        self.code = normalize_code(&self.code);
    }

    pub fn check(&self) -> AppResult<()> {
        Ok(self.validate()?)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AirplaneRequest {
    pub code: String,
    pub seat_capacity: i32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AirplaneSeatsUpdate {
    pub seat_capacity: i32,
}
