use crate::models::airport::Airport;
use crate::repositories::AirportRepository;
use crate::services::{checked_code, page_bounds, within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::AppResult;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AirportService {
    airports: Arc<dyn AirportRepository>,
    timeout: Duration,
}

impl AirportService {
    pub fn new(airports: Arc<dyn AirportRepository>) -> Self {
        AirportService {
            airports,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn create(&self, code: &str, city: &str) -> AppResult<Airport> {
        let airport = Airport::new(code, city);
        airport.check()?;

        within(self.timeout, self.airports.create(&airport)).await?;
        tracing::info!(code = %airport.code, "airport created");
        Ok(airport)
    }

    pub async fn get(&self, code: &str) -> AppResult<Airport> {
        let code = checked_code(code, 1, 8, "invalid airport code")?;
        within(self.timeout, self.airports.get_by_code(&code)).await
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airport>> {
        let (limit, offset) = page_bounds(limit, offset);
        within(self.timeout, self.airports.list(limit, offset)).await
    }

    // Rename the city of an existing airport
    pub async fn update(&self, code: &str, city: &str) -> AppResult<Airport> {
        let airport = Airport::new(code, city);
        airport.check()?;

        within(self.timeout, self.airports.update(&airport.code, &airport.city)).await?;
        Ok(airport)
    }

    pub async fn delete(&self, code: &str) -> AppResult<()> {
        let code = checked_code(code, 1, 8, "invalid airport code")?;
        within(self.timeout, self.airports.delete(&code)).await?;
        tracing::info!(%code, "airport deleted");
        Ok(())
    }
}
