use crate::models::health::HealthStatus;
use crate::repositories::HealthRepository;
use crate::services::{within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::AppResult;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct HealthService {
    store: Arc<dyn HealthRepository>,
    timeout: Duration,
}

impl HealthService {
    pub fn new(store: Arc<dyn HealthRepository>) -> Self {
        HealthService {
            store,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pings the store under the operation deadline and reports the build version.
    pub async fn check(&self) -> AppResult<HealthStatus> {
        if let Err(e) = within(self.timeout, self.store.ping()).await {
            tracing::warn!(error = %e, "store ping failed");
            return Err(e);
        }
        Ok(HealthStatus::ok())
    }
}
