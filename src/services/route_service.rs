use crate::models::route::Route;
use crate::repositories::{AirportRepository, RouteRepository};
use crate::services::{checked_code, page_bounds, within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::AppResult;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct RouteService {
    routes: Arc<dyn RouteRepository>,
    airports: Arc<dyn AirportRepository>,
    timeout: Duration,
}

impl RouteService {
    pub fn new(routes: Arc<dyn RouteRepository>, airports: Arc<dyn AirportRepository>) -> Self {
        RouteService {
            routes,
            airports,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Both airports must already exist.
    pub async fn create(&self, code: &str, origin_code: &str, destination_code: &str) -> AppResult<Route> {
        let route = Route::new(code, origin_code, destination_code);
        route.check()?;

        within(self.timeout, async {
            self.airports.get_by_code(&route.origin_code).await?;
            self.airports.get_by_code(&route.destination_code).await?;
            self.routes.create(&route).await
        })
        .await?;
        tracing::info!(
            code = %route.code,
            origin = %route.origin_code,
            destination = %route.destination_code,
            "route created"
        );
        Ok(route)
    }

    pub async fn get(&self, code: &str) -> AppResult<Route> {
        let code = checked_code(code, 1, 16, "invalid route code")?;
        within(self.timeout, self.routes.get_by_code(&code)).await
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Route>> {
        let (limit, offset) = page_bounds(limit, offset);
        within(self.timeout, self.routes.list(limit, offset)).await
    }

    pub async fn delete(&self, code: &str) -> AppResult<()> {
        let code = checked_code(code, 1, 16, "invalid route code")?;
        within(self.timeout, self.routes.delete(&code)).await?;
        tracing::info!(%code, "route deleted");
        Ok(())
    }
}
