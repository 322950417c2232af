use crate::models::airplane::{Airplane, AirplaneRequest, AirplaneSeatsUpdate};
use crate::models::airport::{Airport, AirportCityUpdate, AirportRequest};
use crate::models::route::{Route, RouteRequest};
use crate::services::airplane_service::AirplaneService;
use crate::services::airport_service::AirportService;
use crate::services::route_service::RouteService;
use crate::utils::error::AppError;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// Register an airport
#[openapi(tag = "Airports")]
#[post("/airports", format = "json", data = "<request>")]
pub async fn create_airport(
    request: Json<AirportRequest>,
    airport_service: &State<AirportService>,
) -> Result<Json<Airport>, AppError> {
    let request = request.into_inner();
    let airport = airport_service.create(&request.code, &request.city).await?;
    Ok(Json(airport))
}

#[openapi(tag = "Airports")]
#[get("/airports?<limit>&<offset>")]
pub async fn list_airports(
    limit: Option<i64>,
    offset: Option<i64>,
    airport_service: &State<AirportService>,
) -> Result<Json<Vec<Airport>>, AppError> {
    let airports = airport_service.list(limit.unwrap_or(0), offset.unwrap_or(0)).await?;
    Ok(Json(airports))
}

#[openapi(tag = "Airports")]
#[get("/airports/<code>")]
pub async fn get_airport(code: String, airport_service: &State<AirportService>) -> Result<Json<Airport>, AppError> {
    Ok(Json(airport_service.get(&code).await?))
}

/// Change the city of an airport
#[openapi(tag = "Airports")]
#[put("/airports/<code>", format = "json", data = "<request>")]
pub async fn update_airport(
    code: String,
    request: Json<AirportCityUpdate>,
    airport_service: &State<AirportService>,
) -> Result<Json<Airport>, AppError> {
    let airport = airport_service.update(&code, &request.city).await?;
    Ok(Json(airport))
}

/// Delete an airport no route refers to
#[openapi(tag = "Airports")]
#[delete("/airports/<code>")]
pub async fn delete_airport(code: String, airport_service: &State<AirportService>) -> Result<Json<Value>, AppError> {
    airport_service.delete(&code).await?;
    Ok(Json(json!({ "status": "deleted" })))
}

/// Register an airplane and its seat capacity
#[openapi(tag = "Airplanes")]
#[post("/airplanes", format = "json", data = "<request>")]
pub async fn create_airplane(
    request: Json<AirplaneRequest>,
    airplane_service: &State<AirplaneService>,
) -> Result<Json<Airplane>, AppError> {
    let request = request.into_inner();
    let airplane = airplane_service.create(&request.code, request.seat_capacity).await?;
    Ok(Json(airplane))
}

#[openapi(tag = "Airplanes")]
#[get("/airplanes?<limit>&<offset>")]
pub async fn list_airplanes(
    limit: Option<i64>,
    offset: Option<i64>,
    airplane_service: &State<AirplaneService>,
) -> Result<Json<Vec<Airplane>>, AppError> {
    let airplanes = airplane_service.list(limit.unwrap_or(0), offset.unwrap_or(0)).await?;
    Ok(Json(airplanes))
}

#[openapi(tag = "Airplanes")]
#[get("/airplanes/<code>")]
pub async fn get_airplane(code: String, airplane_service: &State<AirplaneService>) -> Result<Json<Airplane>, AppError> {
    Ok(Json(airplane_service.get(&code).await?))
}

/// Change the seat capacity of an airplane
#[openapi(tag = "Airplanes")]
#[put("/airplanes/<code>", format = "json", data = "<request>")]
pub async fn update_airplane(
    code: String,
    request: Json<AirplaneSeatsUpdate>,
    airplane_service: &State<AirplaneService>,
) -> Result<Json<Airplane>, AppError> {
    let airplane = airplane_service.update_seats(&code, request.seat_capacity).await?;
    Ok(Json(airplane))
}

#[openapi(tag = "Airplanes")]
#[delete("/airplanes/<code>")]
pub async fn delete_airplane(code: String, airplane_service: &State<AirplaneService>) -> Result<Json<Value>, AppError> {
    airplane_service.delete(&code).await?;
    Ok(Json(json!({ "status": "deleted" })))
}

/// Register a route between two existing airports
#[openapi(tag = "Routes")]
#[post("/routes", format = "json", data = "<request>")]
pub async fn create_route(
    request: Json<RouteRequest>,
    route_service: &State<RouteService>,
) -> Result<Json<Route>, AppError> {
    let request = request.into_inner();
    let route = route_service
        .create(&request.code, &request.origin_code, &request.destination_code)
        .await?;
    Ok(Json(route))
}

#[openapi(tag = "Routes")]
#[get("/routes?<limit>&<offset>")]
pub async fn list_routes(
    limit: Option<i64>,
    offset: Option<i64>,
    route_service: &State<RouteService>,
) -> Result<Json<Vec<Route>>, AppError> {
    let routes = route_service.list(limit.unwrap_or(0), offset.unwrap_or(0)).await?;
    Ok(Json(routes))
}

#[openapi(tag = "Routes")]
#[get("/routes/<code>")]
pub async fn get_route(code: String, route_service: &State<RouteService>) -> Result<Json<Route>, AppError> {
    Ok(Json(route_service.get(&code).await?))
}

#[openapi(tag = "Routes")]
#[delete("/routes/<code>")]
pub async fn delete_route(code: String, route_service: &State<RouteService>) -> Result<Json<Value>, AppError> {
    route_service.delete(&code).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
