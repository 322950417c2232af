use crate::models::booking::{Booking, BookingRequest};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Book the next free seat on a schedule
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<BookingRequest>,
    booking_service: &State<BookingService>,
) -> Result<Json<Booking>, AppError> {
    let request = request.into_inner();
    let booking = booking_service
        .create_booking(request.schedule_id, &request.passenger_name)
        .await?;
    Ok(Json(booking))
}

/// Look up a booking by its reference
#[openapi(tag = "Bookings")]
#[get("/bookings/<reference>")]
pub async fn get_booking(
    reference: String,
    booking_service: &State<BookingService>,
) -> Result<Json<Booking>, AppError> {
    let booking = booking_service.get_by_reference(&reference).await?;
    Ok(Json(booking))
}

/// List the bookings of a schedule, ordered by seat
#[openapi(tag = "Bookings")]
#[get("/schedules/<schedule_id>/bookings?<limit>&<offset>")]
pub async fn list_schedule_bookings(
    schedule_id: i64,
    limit: Option<i64>,
    offset: Option<i64>,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = booking_service
        .list_by_schedule(schedule_id, limit.unwrap_or(0), offset.unwrap_or(0))
        .await?;
    Ok(Json(bookings))
}
