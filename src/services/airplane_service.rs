use crate::models::airplane::Airplane;
use crate::repositories::AirplaneRepository;
use crate::services::{checked_code, page_bounds, within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::AppResult;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AirplaneService {
    airplanes: Arc<dyn AirplaneRepository>,
    timeout: Duration,
}

impl AirplaneService {
    pub fn new(airplanes: Arc<dyn AirplaneRepository>) -> Self {
        AirplaneService {
            airplanes,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn create(&self, code: &str, seat_capacity: i32) -> AppResult<Airplane> {
        let airplane = Airplane::new(code, seat_capacity);
        airplane.check()?;

        within(self.timeout, self.airplanes.create(&airplane)).await?;
        tracing::info!(code = %airplane.code, seat_capacity, "airplane created");
        Ok(airplane)
    }

    pub async fn get(&self, code: &str) -> AppResult<Airplane> {
        let code = checked_code(code, 1, 16, "invalid airplane code")?;
        within(self.timeout, self.airplanes.get_by_code(&code)).await
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airplane>> {
        let (limit, offset) = page_bounds(limit, offset);
        within(self.timeout, self.airplanes.list(limit, offset)).await
    }

    /// Changing capacity does not touch existing bookings. A schedule whose
    /// confirmed count is above the new capacity is simply reported as full.
    pub async fn update_seats(&self, code: &str, seat_capacity: i32) -> AppResult<Airplane> {
        let airplane = Airplane::new(code, seat_capacity);
        airplane.check()?;

        within(self.timeout, self.airplanes.update_seats(&airplane.code, airplane.seat_capacity)).await?;
        Ok(airplane)
    }

    pub async fn delete(&self, code: &str) -> AppResult<()> {
        let code = checked_code(code, 1, 16, "invalid airplane code")?;
        within(self.timeout, self.airplanes.delete(&code)).await?;
        tracing::info!(%code, "airplane deleted");
        Ok(())
    }
}
