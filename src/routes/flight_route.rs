use crate::models::search::{FlightOption, FlightSearchQuery, TransitOption};
use crate::services::flight_service::FlightService;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Search direct flights
#[openapi(tag = "Flights")]
#[get("/flights/search?<origin>&<destination>&<date>")]
pub async fn search_flights(
    origin: String,
    destination: String,
    date: Option<String>,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<FlightOption>>, AppError> {
    let query = FlightSearchQuery::new(&origin, &destination, date.as_deref());
    let flights = flight_service.search_direct_flights(&query).await?;
    Ok(Json(flights))
}

/// Search one-stop flights through any intermediate airport
#[openapi(tag = "Flights")]
#[get("/flights/search/transit?<origin>&<destination>&<date>")]
pub async fn search_transit_flights(
    origin: String,
    destination: String,
    date: Option<String>,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<TransitOption>>, AppError> {
    let query = FlightSearchQuery::new(&origin, &destination, date.as_deref());
    let options = flight_service.search_transit_flights(&query).await?;
    Ok(Json(options))
}
