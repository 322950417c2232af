use async_trait::async_trait;
use flight_booking::{
    models::{airplane::Airplane, booking::BookingStatus},
    repositories::{memory::InMemoryStore, AirplaneRepository, BookingRepository},
    services::booking_service::BookingService,
    utils::error::{AppError, AppResult},
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use test_context::{test_context, AsyncTestContext};
use tokio::task::JoinSet;

#[macro_use]
mod common {
    #[macro_use]
    pub mod test_utils;
}
use common::test_utils::{SequentialReferences, Services};

struct BookingServiceContext {
    services: Services,
}

#[async_trait]
impl AsyncTestContext for BookingServiceContext {
    async fn setup() -> Self {
        BookingServiceContext {
            services: Services::with_references(Arc::new(SequentialReferences::default())),
        }
    }

    async fn teardown(self) {}
}

/// Airplane lookups that stall long enough to miss any booking deadline.
struct StalledAirplanes {
    inner: Arc<InMemoryStore>,
}

#[async_trait]
impl AirplaneRepository for StalledAirplanes {
    async fn create(&self, airplane: &Airplane) -> AppResult<()> {
        AirplaneRepository::create(self.inner.as_ref(), airplane).await
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Airplane> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        AirplaneRepository::get_by_code(self.inner.as_ref(), code).await
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Airplane>> {
        AirplaneRepository::list(self.inner.as_ref(), limit, offset).await
    }

    async fn update_seats(&self, code: &str, seat_capacity: i32) -> AppResult<()> {
        self.inner.update_seats(code, seat_capacity).await
    }

    async fn delete(&self, code: &str) -> AppResult<()> {
        AirplaneRepository::delete(self.inner.as_ref(), code).await
    }
}

struct StalledStoreContext {
    services: Services,
    bookings: BookingService,
}

#[async_trait]
impl AsyncTestContext for StalledStoreContext {
    async fn setup() -> Self {
        let services = Services::with_references(Arc::new(SequentialReferences::default()));
        let store = services.store.clone();
        let bookings = BookingService::new(
            store.clone(),
            store.clone(),
            Arc::new(StalledAirplanes { inner: store }),
            Arc::new(SequentialReferences::default()),
        )
        .with_timeout(Duration::from_millis(50));
        StalledStoreContext { services, bookings }
    }

    async fn teardown(self) {}
}

fn is_hex_reference(reference: &str) -> bool {
    reference.len() == 13
        && reference.starts_with("BK-")
        && reference[3..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_seats_are_assigned_in_order(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;
    let schedule = s.schedule("CGK", "DPS", "A320", 5, "2025-01-01").await?;

    let bookings = s.book_many(schedule.id, 3).await?;
    let seats: Vec<i32> = bookings.iter().map(|b| b.seat_number).collect();
    assert_eq!(seats, vec![1, 2, 3]);
    assert_eq!(bookings[0].reference, "BK-0000000001");
    assert!(bookings.iter().all(|b| b.status == BookingStatus::Confirmed && b.schedule_id == schedule.id));
    assert_eq!(s.store.count_by_schedule(schedule.id).await?, 3);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_full_flight_is_rejected(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;
    let schedule = s.schedule("CGK", "DPS", "ATR72", 2, "2025-01-01").await?;

    let alice = s.bookings.create_booking(schedule.id, "Alice").await?;
    let bob = s.bookings.create_booking(schedule.id, "  Bob  ").await?;
    assert_eq!((alice.seat_number, bob.seat_number), (1, 2));
    assert_eq!(bob.passenger_name, "Bob");

    let carol = s.bookings.create_booking(schedule.id, "Carol").await;
    assert_eq!(carol, Err(AppError::FlightFull));
    assert_eq!(s.store.count_by_schedule(schedule.id).await?, 2);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_invalid_booking_input_creates_nothing(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;
    let schedule = s.schedule("CGK", "DPS", "A320", 5, "2025-01-01").await?;

    assert_eq!(
        s.bookings.create_booking(0, "Alice").await,
        Err(AppError::ValidationError("invalid schedule id".into()))
    );
    assert_eq!(
        s.bookings.create_booking(schedule.id, "   ").await,
        Err(AppError::ValidationError("invalid passenger name".into()))
    );
    assert_eq!(
        s.bookings.create_booking(schedule.id + 100, "Alice").await,
        Err(AppError::NotFound("Schedule not found".into()))
    );
    assert_eq!(s.store.count_by_schedule(schedule.id).await?, 0);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_get_by_reference(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;
    let schedule = s.schedule("CGK", "DPS", "A320", 5, "2025-01-01").await?;
    let booking = s.bookings.create_booking(schedule.id, "Alice").await?;

    let found = s.bookings.get_by_reference(" bk-0000000001 ").await?;
    assert_eq!(found, booking);

    assert_eq!(
        s.bookings.get_by_reference("AB").await,
        Err(AppError::ValidationError("invalid booking reference".into()))
    );
    assert_eq!(
        s.bookings.get_by_reference("BK-FFFFFFFFFF").await,
        Err(AppError::NotFound("Booking not found".into()))
    );
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn test_list_by_schedule(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let s = &ctx.services;
    let schedule = s.schedule("CGK", "DPS", "A320", 10, "2025-01-01").await?;
    s.book_many(schedule.id, 4).await?;

    // Out-of-range limit falls back to the default, negative offset to 0
    let all = s.bookings.list_by_schedule(schedule.id, 0, -5).await?;
    assert_eq!(all.iter().map(|b| b.seat_number).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

    let page = s.bookings.list_by_schedule(schedule.id, 2, 1).await?;
    assert_eq!(page.iter().map(|b| b.seat_number).collect::<Vec<_>>(), vec![2, 3]);

    assert_eq!(
        s.bookings.list_by_schedule(-1, 10, 0).await,
        Err(AppError::ValidationError("invalid schedule id".into()))
    );
    assert_eq!(
        s.bookings.list_by_schedule(schedule.id + 1, 10, 0).await,
        Err(AppError::NotFound("Schedule not found".into()))
    );
    Ok(())
}

#[test_context(StalledStoreContext)]
#[tokio::test(start_paused = true)]
async fn test_deadline_leaves_no_booking_behind(ctx: &StalledStoreContext) -> Result<(), AppError> {
    let schedule = ctx.services.schedule("CGK", "DPS", "A320", 5, "2025-01-01").await?;

    assert_eq!(
        ctx.bookings.create_booking(schedule.id, "Alice").await,
        Err(AppError::Timeout)
    );
    assert_eq!(ctx.services.store.count_by_schedule(schedule.id).await?, 0);
    assert!(ctx.services.bookings.list_by_schedule(schedule.id, 10, 0).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_secure_references_are_unique() -> Result<(), AppError> {
    let s = Services::in_memory();
    let schedule = s.schedule("CGK", "DPS", "B777", 50, "2025-01-01").await?;

    let bookings = s.book_many(schedule.id, 50).await?;
    let references: HashSet<&str> = bookings.iter().map(|b| b.reference.as_str()).collect();
    assert_eq!(references.len(), 50);
    assert!(references.iter().all(|r| is_hex_reference(r)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_respect_capacity() -> Result<(), AppError> {
    let test_name = "test_concurrent_bookings_respect_capacity";
    let s = Services::in_memory();
    let capacity = 5;
    let num_passengers = 20;
    let schedule = s.schedule("CGK", "DPS", "ATR72", capacity, "2025-01-01").await?;

    test_println!(test_name, "Starting {} concurrent booking attempts...", num_passengers);
    let schedule_id = schedule.id;
    let mut join_set = JoinSet::new();
    for i in 0..num_passengers {
        let booking_service = s.bookings.clone();
        join_set.spawn(async move {
            let result = booking_service
                .create_booking(schedule_id, &format!("Passenger {}", i))
                .await;
            (i, result)
        });
    }

    let mut seats = HashSet::new();
    let mut rejected = 0;
    while let Some(result) = join_set.join_next().await {
        match result.unwrap() {
            (i, Ok(booking)) => {
                test_println!(test_name, "Passenger {} got seat {}", i, booking.seat_number);
                assert!(seats.insert(booking.seat_number), "seat assigned twice");
            }
            (i, Err(e)) => {
                test_println!(test_name, "Passenger {} failed to book: {}", i, e);
                assert_eq!(e, AppError::FlightFull);
                rejected += 1;
            }
        }
    }

    assert_eq!(seats, (1..=capacity).collect::<HashSet<i32>>());
    assert_eq!(rejected, num_passengers - capacity as usize);
    assert_eq!(s.store.count_by_schedule(schedule.id).await?, i64::from(capacity));
    Ok(())
}
