#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

use flight_booking::config::AppConfig;
use flight_booking::db::Database;
use flight_booking::repositories::mysql::MySqlStore;
use flight_booking::routes;
use flight_booking::services::airplane_service::AirplaneService;
use flight_booking::services::airport_service::AirportService;
use flight_booking::services::booking_service::BookingService;
use flight_booking::services::flight_service::FlightService;
use flight_booking::services::health_service::HealthService;
use flight_booking::services::reference::SecureReferenceGenerator;
use flight_booking::services::route_service::RouteService;
use flight_booking::services::schedule_service::ScheduleService;
use flight_booking::swagger::swagger_ui;
use rocket::fairing::AdHoc;
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[launch]
async fn rocket() -> _ {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flight_booking=info,rocket=warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to the database and make sure the tables exist
    let database = Database::new(&config.database)
        .await
        .expect("Failed to connect to database");
    database.migrate().await.expect("Failed to create tables");
    tracing::info!(timeout = ?config.operation_timeout, "database ready");

    let store = Arc::new(MySqlStore::new(database.get_pool().clone()));
    let timeout = config.operation_timeout;

    let flight_service = FlightService::new(store.clone(), store.clone(), store.clone(), store.clone()).with_timeout(timeout);
    let booking_service = BookingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(SecureReferenceGenerator),
    )
    .with_timeout(timeout);
    let airport_service = AirportService::new(store.clone()).with_timeout(timeout);
    let airplane_service = AirplaneService::new(store.clone()).with_timeout(timeout);
    let route_service = RouteService::new(store.clone(), store.clone()).with_timeout(timeout);
    let schedule_service = ScheduleService::new(store.clone(), store.clone(), store.clone()).with_timeout(timeout);
    let health_service = HealthService::new(store).with_timeout(timeout);

    rocket::build()
        .manage(flight_service)
        .manage(booking_service)
        .manage(airport_service)
        .manage(airplane_service)
        .manage(route_service)
        .manage(schedule_service)
        .manage(health_service)
        .mount(
            "/api",
            openapi_get_routes![
                routes::health_route::health,
                routes::flight_route::search_flights,
                routes::flight_route::search_transit_flights,
                routes::booking_route::create_booking,
                routes::booking_route::get_booking,
                routes::booking_route::list_schedule_bookings,
                routes::inventory_route::create_airport,
                routes::inventory_route::list_airports,
                routes::inventory_route::get_airport,
                routes::inventory_route::update_airport,
                routes::inventory_route::delete_airport,
                routes::inventory_route::create_airplane,
                routes::inventory_route::list_airplanes,
                routes::inventory_route::get_airplane,
                routes::inventory_route::update_airplane,
                routes::inventory_route::delete_airplane,
                routes::inventory_route::create_route,
                routes::inventory_route::list_routes,
                routes::inventory_route::get_route,
                routes::inventory_route::delete_route,
                routes::schedule_route::create_schedule,
                routes::schedule_route::list_schedules,
                routes::schedule_route::get_schedule,
                routes::schedule_route::delete_schedule,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new("Access-Control-Allow-Origin", "*"));
            })
        }))
}
