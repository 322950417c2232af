use crate::models::normalize_code;
use crate::models::schedule::{parse_departure_date, FlightSchedule};
use crate::repositories::{AirplaneRepository, FlightScheduleRepository, RouteRepository};
use crate::services::{page_bounds, within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn FlightScheduleRepository>,
    routes: Arc<dyn RouteRepository>,
    airplanes: Arc<dyn AirplaneRepository>,
    timeout: Duration,
}

impl ScheduleService {
    pub fn new(
        schedules: Arc<dyn FlightScheduleRepository>,
        routes: Arc<dyn RouteRepository>,
        airplanes: Arc<dyn AirplaneRepository>,
    ) -> Self {
        ScheduleService {
            schedules,
            routes,
            airplanes,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Schedule a route on a `YYYY-MM-DD` day. The route and the airplane must exist.
    pub async fn create(&self, route_code: &str, airplane_code: &str, departure_date: &str) -> AppResult<FlightSchedule> {
        let date = parse_departure_date(departure_date)?;
        let schedule = FlightSchedule::new(route_code, airplane_code, date);
        schedule.check()?;

        let schedule = within(self.timeout, async {
            self.routes.get_by_code(&schedule.route_code).await?;
            self.airplanes.get_by_code(&schedule.airplane_code).await?;
            self.schedules.create(schedule.clone()).await
        })
        .await?;
        tracing::info!(
            id = schedule.id,
            route = %schedule.route_code,
            date = %schedule.departure_date,
            "schedule created"
        );
        Ok(schedule)
    }

    pub async fn get(&self, id: i64) -> AppResult<FlightSchedule> {
        if id <= 0 {
            return Err(AppError::validation("invalid schedule id"));
        }
        within(self.timeout, self.schedules.get_by_id(id)).await
    }

    /// Schedules of one route, or of all routes when `route_code` is missing or blank.
    pub async fn list(&self, route_code: Option<&str>, limit: i64, offset: i64) -> AppResult<Vec<FlightSchedule>> {
        let route_code = route_code.map(normalize_code).filter(|code| !code.is_empty());
        let (limit, offset) = page_bounds(limit, offset);
        within(self.timeout, self.schedules.list(route_code.as_deref(), limit, offset)).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::validation("invalid schedule id"));
        }
        within(self.timeout, self.schedules.delete(id)).await?;
        tracing::info!(id, "schedule deleted");
        Ok(())
    }
}
