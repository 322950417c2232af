use crate::models::route::Route;
use crate::models::schedule::FlightSchedule;
use crate::models::search::{FlightOption, FlightSearchQuery, SearchCriteria, TransitOption};
use crate::repositories::pager::{paginate, SCAN_PAGE_SIZE};
use crate::repositories::{AirplaneRepository, BookingRepository, FlightScheduleRepository, RouteRepository};
use crate::services::{within, DEFAULT_OPERATION_TIMEOUT};
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDate;
use futures::future::{self, FutureExt};
use futures::stream::{Stream, TryStreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Direct and one-stop flight search over live seat inventory.
#[derive(Clone)]
pub struct FlightService {
    routes: Arc<dyn RouteRepository>,
    schedules: Arc<dyn FlightScheduleRepository>,
    airplanes: Arc<dyn AirplaneRepository>,
    bookings: Arc<dyn BookingRepository>,
    timeout: Duration,
}

impl FlightService {
    pub fn new(
        routes: Arc<dyn RouteRepository>,
        schedules: Arc<dyn FlightScheduleRepository>,
        airplanes: Arc<dyn AirplaneRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        FlightService {
            routes,
            schedules,
            airplanes,
            bookings,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // Search bookable schedules flying origin -> destination without a stop
    pub async fn search_direct_flights(&self, query: &FlightSearchQuery) -> AppResult<Vec<FlightOption>> {
        let criteria = SearchCriteria::try_from(query)?;
        within(self.timeout, self.direct(&criteria)).await
    }

    // Search pairs of bookable schedules connected through one intermediate airport
    pub async fn search_transit_flights(&self, query: &FlightSearchQuery) -> AppResult<Vec<TransitOption>> {
        let criteria = SearchCriteria::try_from(query)?;
        within(self.timeout, self.transit(&criteria)).await
    }

    async fn direct(&self, criteria: &SearchCriteria) -> AppResult<Vec<FlightOption>> {
        let matched: Vec<Route> = self
            .route_stream()
            .try_filter(|route| future::ready(route.connects(&criteria.origin, &criteria.destination)))
            .try_collect()
            .await?;
        if matched.is_empty() {
            return Err(AppError::not_found("Route not found"));
        }

        let mut inventory = SeatInventory::new(self.airplanes.as_ref(), self.bookings.as_ref());
        let mut options = Vec::new();
        for route in &matched {
            for schedule in self.dated_schedules(&route.code, criteria.departure_date).await? {
                if let Some(option) = inventory.option(route, &schedule).await? {
                    options.push(option);
                }
            }
        }

        tracing::debug!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            routes = matched.len(),
            options = options.len(),
            "direct search finished"
        );
        Ok(options)
    }

    async fn transit(&self, criteria: &SearchCriteria) -> AppResult<Vec<TransitOption>> {
        let origin = criteria.origin.as_str();
        let destination = criteria.destination.as_str();

        // One pass over the route table, split into the two leg shapes
        let mut outbound = Vec::new();
        let mut inbound = Vec::new();
        let mut routes = std::pin::pin!(self.route_stream());
        while let Some(route) = routes.try_next().await? {
            if route.origin_code == origin && route.destination_code != destination {
                outbound.push(route);
            } else if route.destination_code == destination && route.origin_code != origin {
                inbound.push(route);
            }
        }

        // First-leg schedules are needed anyway, so fetching them also decides
        // which intermediates have a departure on the requested day.
        let mut first_legs = Vec::new();
        let mut intermediates: Vec<String> = Vec::new();
        for route in outbound {
            let schedules = self.dated_schedules(&route.code, criteria.departure_date).await?;
            if schedules.is_empty() {
                continue;
            }
            if !intermediates.contains(&route.destination_code) {
                intermediates.push(route.destination_code.clone());
            }
            first_legs.push((route, schedules));
        }

        let mut inventory = SeatInventory::new(self.airplanes.as_ref(), self.bookings.as_ref());
        let mut options = Vec::new();
        for intermediate in &intermediates {
            let second_routes: Vec<&Route> = inbound.iter().filter(|r| &r.origin_code == intermediate).collect();
            if second_routes.is_empty() {
                continue;
            }

            let mut first_options = Vec::new();
            for (route, schedules) in first_legs.iter().filter(|(r, _)| &r.destination_code == intermediate) {
                for schedule in schedules {
                    if let Some(option) = inventory.option(route, schedule).await? {
                        first_options.push(option);
                    }
                }
            }
            if first_options.is_empty() {
                continue;
            }

            let mut second_options = Vec::new();
            for route in second_routes {
                for schedule in self.dated_schedules(&route.code, criteria.departure_date).await? {
                    if let Some(option) = inventory.option(route, &schedule).await? {
                        second_options.push(option);
                    }
                }
            }

            for first in &first_options {
                for second in &second_options {
                    options.push(TransitOption::connect(first.clone(), second.clone()));
                }
            }
        }

        tracing::debug!(
            origin,
            destination,
            intermediates = intermediates.len(),
            options = options.len(),
            "transit search finished"
        );
        Ok(options)
    }

    fn route_stream(&self) -> impl Stream<Item = AppResult<Route>> + Send + 'static {
        let routes = Arc::clone(&self.routes);
        paginate(SCAN_PAGE_SIZE, move |limit, offset| {
            let routes = Arc::clone(&routes);
            async move { routes.list(limit, offset).await }.boxed()
        })
    }

    fn schedule_stream(&self, route_code: &str) -> impl Stream<Item = AppResult<FlightSchedule>> + Send + 'static {
        let schedules = Arc::clone(&self.schedules);
        let route_code = route_code.to_string();
        paginate(SCAN_PAGE_SIZE, move |limit, offset| {
            let schedules = Arc::clone(&schedules);
            let route_code = route_code.clone();
            async move { schedules.list(Some(&route_code), limit, offset).await }.boxed()
        })
    }

    async fn dated_schedules(&self, route_code: &str, date: Option<NaiveDate>) -> AppResult<Vec<FlightSchedule>> {
        self.schedule_stream(route_code)
            .try_filter(|schedule| future::ready(schedule.departs_on(date)))
            .try_collect()
            .await
    }
}

/// Seat availability for schedules within one search call. Airplane
/// capacities are cached by code, so each airplane is fetched at most once.
struct SeatInventory<'a> {
    airplanes: &'a dyn AirplaneRepository,
    bookings: &'a dyn BookingRepository,
    capacities: HashMap<String, i32>,
}

impl<'a> SeatInventory<'a> {
    fn new(airplanes: &'a dyn AirplaneRepository, bookings: &'a dyn BookingRepository) -> Self {
        SeatInventory {
            airplanes,
            bookings,
            capacities: HashMap::new(),
        }
    }

    async fn capacity(&mut self, airplane_code: &str) -> AppResult<i32> {
        if let Some(capacity) = self.capacities.get(airplane_code) {
            return Ok(*capacity);
        }
        tracing::debug!(airplane = airplane_code, "airplane capacity cache miss");
        let airplane = self.airplanes.get_by_code(airplane_code).await?;
        self.capacities.insert(airplane_code.to_string(), airplane.seat_capacity);
        Ok(airplane.seat_capacity)
    }

    /// The schedule as a bookable option, or `None` when it has no free seat.
    async fn option(&mut self, route: &Route, schedule: &FlightSchedule) -> AppResult<Option<FlightOption>> {
        let capacity = self.capacity(&schedule.airplane_code).await?;
        if capacity <= 0 {
            return Ok(None);
        }
        let booked = self.bookings.count_by_schedule(schedule.id).await?;
        let available = i64::from(capacity) - booked;
        if available <= 0 {
            return Ok(None);
        }

        Ok(Some(FlightOption {
            schedule_id: schedule.id,
            route_code: route.code.clone(),
            origin_code: route.origin_code.clone(),
            destination_code: route.destination_code.clone(),
            airplane_code: schedule.airplane_code.clone(),
            departure_date: schedule.departure_date,
            seats_available: available,
            total_seats: capacity,
        }))
    }
}
