pub mod booking_route;
pub mod flight_route;
pub mod health_route;
pub mod inventory_route;
pub mod schedule_route;
