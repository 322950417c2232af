pub mod airplane_service;
pub mod airport_service;
pub mod booking_service;
pub mod flight_service;
pub mod health_service;
pub mod reference;
pub mod route_service;
pub mod schedule_service;

use crate::models::normalize_code;
use crate::utils::error::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 500;

/// Limit falls back to the default when outside (0, 500]; offset is floored at 0.
pub(crate) fn page_bounds(limit: i64, offset: i64) -> (i64, i64) {
    let limit = if limit <= 0 || limit > MAX_LIST_LIMIT {
        DEFAULT_LIST_LIMIT
    } else {
        limit
    };
    (limit, offset.max(0))
}

/// Normalized key with its length checked, for operations that take a bare code.
pub(crate) fn checked_code(raw: &str, min: usize, max: usize, message: &str) -> AppResult<String> {
    let code = normalize_code(raw);
    let length = code.chars().count();
    if length < min || length > max {
        return Err(AppError::validation(message));
    }
    Ok(code)
}

/// Runs one operation's repository calls under a single deadline. Nothing is
/// committed if the deadline fires, since the write is always the last call.
pub(crate) async fn within<T, F>(deadline: Duration, operation: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(?deadline, "operation deadline exceeded");
            Err(AppError::Timeout)
        }
    }
}
