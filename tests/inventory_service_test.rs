use async_trait::async_trait;
use flight_booking::utils::error::AppError;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{date, Services};

struct InventoryContext {
    services: Services,
}

#[async_trait]
impl AsyncTestContext for InventoryContext {
    async fn setup() -> Self {
        let services = Services::in_memory();
        services
            .airports
            .create("CGK", "Jakarta")
            .await
            .expect("Failed to seed airport");
        services
            .airports
            .create("DPS", "Denpasar")
            .await
            .expect("Failed to seed airport");
        InventoryContext { services }
    }

    async fn teardown(self) {}
}

#[test_context(InventoryContext)]
#[tokio::test]
async fn test_airport_lifecycle(ctx: &InventoryContext) -> Result<(), AppError> {
    let airports = &ctx.services.airports;

    let created = airports.create("  sub ", "  Surabaya ").await?;
    assert_eq!((created.code.as_str(), created.city.as_str()), ("SUB", "Surabaya"));
    assert_eq!(
        airports.create("SUB", "Other").await,
        Err(AppError::Conflict("Airport already exists".into()))
    );
    assert_eq!(
        airports.create("TOOLONGCODE", "Nowhere").await,
        Err(AppError::ValidationError("invalid airport code".into()))
    );
    assert_eq!(
        airports.create("KNO", "   ").await,
        Err(AppError::ValidationError("invalid airport city".into()))
    );

    let updated = airports.update("sub", "Juanda").await?;
    assert_eq!(updated.city, "Juanda");
    assert_eq!(airports.get("SUB").await?.city, "Juanda");
    assert_eq!(
        airports.update("KNO", "Medan").await,
        Err(AppError::NotFound("Airport not found".into()))
    );

    let codes: Vec<String> = airports.list(0, 0).await?.into_iter().map(|a| a.code).collect();
    assert_eq!(codes, vec!["CGK", "DPS", "SUB"]);
    assert_eq!(airports.list(1, 2).await?.len(), 1);

    airports.delete("sub").await?;
    assert_eq!(
        airports.get("SUB").await,
        Err(AppError::NotFound("Airport not found".into()))
    );
    Ok(())
}

#[test_context(InventoryContext)]
#[tokio::test]
async fn test_airplane_lifecycle(ctx: &InventoryContext) -> Result<(), AppError> {
    let airplanes = &ctx.services.airplanes;

    let created = airplanes.create(" a320 ", 180).await?;
    assert_eq!(created.code, "A320");
    assert_eq!(
        airplanes.create("B737", 0).await,
        Err(AppError::ValidationError("invalid seat capacity".into()))
    );
    assert_eq!(
        airplanes.create("A320", 150).await,
        Err(AppError::Conflict("Airplane already exists".into()))
    );

    airplanes.update_seats("A320", 150).await?;
    assert_eq!(airplanes.get("a320").await?.seat_capacity, 150);
    assert_eq!(
        airplanes.update_seats("A320", -1).await,
        Err(AppError::ValidationError("invalid seat capacity".into()))
    );

    airplanes.delete("A320").await?;
    assert_eq!(
        airplanes.delete("A320").await,
        Err(AppError::NotFound("Airplane not found".into()))
    );
    Ok(())
}

#[test_context(InventoryContext)]
#[tokio::test]
async fn test_route_requires_known_distinct_airports(ctx: &InventoryContext) -> Result<(), AppError> {
    let routes = &ctx.services.routes;

    let route = routes.create("gA-400", "cgk", "dps").await?;
    assert_eq!(route.code, "GA-400");
    assert_eq!(
        routes.create("GA-401", "CGK", "cgk").await,
        Err(AppError::ValidationError("invalid route airports".into()))
    );
    assert_eq!(
        routes.create("GA-402", "CGK", "XXX").await,
        Err(AppError::NotFound("Airport not found".into()))
    );
    assert_eq!(
        routes.create("GA-400", "DPS", "CGK").await,
        Err(AppError::Conflict("Route already exists".into()))
    );
    assert_eq!(routes.list(10, 0).await?, vec![route]);
    Ok(())
}

#[test_context(InventoryContext)]
#[tokio::test]
async fn test_schedule_lifecycle(ctx: &InventoryContext) -> Result<(), AppError> {
    let s = &ctx.services;
    s.airplanes.create("A320", 2).await?;
    s.routes.create("GA-400", "CGK", "DPS").await?;

    let later = s.schedules.create("ga-400", "a320", "2025-02-01").await?;
    let earlier = s.schedules.create("GA-400", "A320", "2025-01-01").await?;
    assert!(later.id > 0 && earlier.id > later.id);
    assert_eq!(earlier.departure_date, date("2025-01-01"));

    assert_eq!(
        s.schedules.create("GA-400", "A320", "2025-13-01").await,
        Err(AppError::ValidationError("invalid departure date".into()))
    );
    assert_eq!(
        s.schedules.create("GA-999", "A320", "2025-01-01").await,
        Err(AppError::NotFound("Route not found".into()))
    );
    assert_eq!(
        s.schedules.create("GA-400", "B737", "2025-01-01").await,
        Err(AppError::NotFound("Airplane not found".into()))
    );

    // Listed by departure date
    let ids: Vec<i64> = s.schedules.list(Some("ga-400"), 0, 0).await?.iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![earlier.id, later.id]);
    assert_eq!(s.schedules.list(None, 0, 0).await?.len(), 2);
    assert!(s.schedules.list(Some("GA-999"), 0, 0).await?.is_empty());

    assert_eq!(
        s.schedules.get(0).await,
        Err(AppError::ValidationError("invalid schedule id".into()))
    );
    s.schedules.delete(later.id).await?;
    assert_eq!(
        s.schedules.get(later.id).await,
        Err(AppError::NotFound("Schedule not found".into()))
    );
    Ok(())
}

#[test_context(InventoryContext)]
#[tokio::test]
async fn test_deletes_are_restricted(ctx: &InventoryContext) -> Result<(), AppError> {
    let s = &ctx.services;
    let schedule = s.schedule("CGK", "DPS", "A320", 2, "2025-01-01").await?;
    s.bookings.create_booking(schedule.id, "Alice").await?;

    assert!(matches!(s.airports.delete("CGK").await, Err(AppError::Conflict(_))));
    assert!(matches!(s.airplanes.delete("A320").await, Err(AppError::Conflict(_))));
    assert!(matches!(s.routes.delete("CGK-DPS").await, Err(AppError::Conflict(_))));
    assert!(matches!(s.schedules.delete(schedule.id).await, Err(AppError::Conflict(_))));

    // Everything is still searchable
    assert_eq!(s.schedules.get(schedule.id).await?, schedule);
    Ok(())
}
