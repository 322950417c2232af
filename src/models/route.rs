use crate::models::normalize_code;
use crate::utils::error::AppResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A direct path between two airports. Airports are referenced by code only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow, Validate)]
#[validate(schema(function = "distinct_airports"))]
pub struct Route {
    #[validate(length(min = 1, max = 16, message = "invalid route code"))]
    pub code: String,
    #[validate(length(min = 1, max = 8, message = "invalid route airports"))]
    pub origin_code: String,
    #[validate(length(min = 1, max = 8, message = "invalid route airports"))]
    pub destination_code: String,
}

fn distinct_airports(route: &Route) -> Result<(), ValidationError> {
    if route.origin_code == route.destination_code {
        let mut err = ValidationError::new("distinct_airports");
        err.message = Some("invalid route airports".into());
        return Err(err);
    }
    Ok(())
}

impl Route {
    pub fn new(code: &str, origin_code: &str, destination_code: &str) -> Self {
        let mut route = Route {
            code: code.to_string(),
            origin_code: origin_code.to_string(),
            destination_code: destination_code.to_string(),
        };
        route.normalize();
        route
    }

    pub fn normalize(&mut self) {
        self.code = normalize_code(&self.code);
        self.origin_code = normalize_code(&self.origin_code);
        self.destination_code = normalize_code(&self.destination_code);
    }

    pub fn check(&self) -> AppResult<()> {
        Ok(self.validate()?)
    }

    pub fn connects(&self, origin: &str, destination: &str) -> bool {
        self.origin_code == origin && self.destination_code == destination
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RouteRequest {
    pub code: String,
    pub origin_code: String,
    pub destination_code: String,
}
