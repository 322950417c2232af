use crate::models::health::HealthStatus;
use crate::services::health_service::HealthService;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Check database connectivity and report the running version
#[openapi(tag = "Health")]
#[get("/health")]
pub async fn health(health_service: &State<HealthService>) -> Result<Json<HealthStatus>, AppError> {
    let status = health_service.check().await?;
    Ok(Json(status))
}
