use crate::models::schedule::{FlightSchedule, ScheduleRequest};
use crate::services::schedule_service::ScheduleService;
use crate::utils::error::AppError;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// Schedule a route on a day with an airplane
#[openapi(tag = "Schedules")]
#[post("/schedules", format = "json", data = "<request>")]
pub async fn create_schedule(
    request: Json<ScheduleRequest>,
    schedule_service: &State<ScheduleService>,
) -> Result<Json<FlightSchedule>, AppError> {
    let request = request.into_inner();
    let schedule = schedule_service
        .create(&request.route_code, &request.airplane_code, &request.departure_date)
        .await?;
    Ok(Json(schedule))
}

/// List schedules, optionally of a single route
#[openapi(tag = "Schedules")]
#[get("/schedules?<route>&<limit>&<offset>")]
pub async fn list_schedules(
    route: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    schedule_service: &State<ScheduleService>,
) -> Result<Json<Vec<FlightSchedule>>, AppError> {
    let schedules = schedule_service
        .list(route.as_deref(), limit.unwrap_or(0), offset.unwrap_or(0))
        .await?;
    Ok(Json(schedules))
}

#[openapi(tag = "Schedules")]
#[get("/schedules/<id>")]
pub async fn get_schedule(id: i64, schedule_service: &State<ScheduleService>) -> Result<Json<FlightSchedule>, AppError> {
    Ok(Json(schedule_service.get(id).await?))
}

/// Delete a schedule that has no bookings
#[openapi(tag = "Schedules")]
#[delete("/schedules/<id>")]
pub async fn delete_schedule(id: i64, schedule_service: &State<ScheduleService>) -> Result<Json<Value>, AppError> {
    schedule_service.delete(id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
