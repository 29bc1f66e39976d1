//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{IntercityTrip, Route, RouteStop, TimeOfDay};
use crate::schedule::{NearestArrivals, Projection, StopArrivals};

/// Query for the route list.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesQuery {
    /// Embed each route's stops (default true)
    pub include_stops: Option<bool>,
}

/// Query for projected arrivals.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectionQuery {
    /// Reference time in HH:MM format (defaults to now)
    pub at: Option<String>,

    /// Maximum number of arrivals per stop
    pub limit: Option<usize>,
}

/// Query for the stop nearest a position.
#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lon: f64,

    /// Reference time in HH:MM format (defaults to now)
    pub at: Option<String>,
}

/// Query for intercity departures.
#[derive(Debug, Default, Deserialize)]
pub struct IntercityQuery {
    /// Reference time in HH:MM format (defaults to now)
    pub at: Option<String>,

    /// Maximum number of departures per trip
    pub limit: Option<usize>,
}

/// A route in the route list.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub title: String,

    /// First departure from the origin, "HH:MM"
    pub service_start: String,

    /// Last departure from the origin, "HH:MM"
    pub service_end: String,

    pub headway_minutes: i64,

    /// Stops in travel order, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<StopResult>>,
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route, stops: Option<&[RouteStop]>) -> Self {
        Self {
            id: route.id.clone(),
            title: route.title.clone(),
            service_start: route.service_start.to_string(),
            service_end: route.service_end.to_string(),
            headway_minutes: route.headway_minutes,
            stops: stops.map(|stops| stops.iter().map(StopResult::from_route_stop).collect()),
        }
    }
}

/// Response for the route list.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

/// A stop on a route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Stop id (not the route-stop link id)
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Travel time from the route's origin
    pub minutes_from_origin: u32,
}

impl StopResult {
    /// Create from a domain RouteStop.
    pub fn from_route_stop(route_stop: &RouteStop) -> Self {
        Self {
            id: route_stop.stop.id.clone(),
            name: route_stop.stop.name.clone(),
            latitude: route_stop.stop.location.latitude,
            longitude: route_stop.stop.location.longitude,
            minutes_from_origin: route_stop.offset.minutes_from_origin,
        }
    }
}

/// Projected arrivals in display form.
#[derive(Debug, Serialize)]
pub struct ArrivalsResult {
    /// "HH:MM" arrivals, or the single service-ended marker
    pub times: Vec<String>,

    pub service_ended: bool,
}

impl ArrivalsResult {
    /// Create from a projection.
    pub fn from_projection(projection: &Projection) -> Self {
        Self {
            times: projection.to_strings(),
            service_ended: projection.is_service_ended(),
        }
    }
}

/// One stop with its projected arrivals.
#[derive(Debug, Serialize)]
pub struct StopArrivalsResult {
    pub stop: StopResult,
    pub arrivals: ArrivalsResult,
}

impl StopArrivalsResult {
    /// Create from a board row.
    pub fn from_stop_arrivals(row: &StopArrivals<'_>) -> Self {
        Self {
            stop: StopResult::from_route_stop(row.stop),
            arrivals: ArrivalsResult::from_projection(&row.projection),
        }
    }
}

/// Response for a route board.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub route: RouteResult,

    /// Reference time the board was projected from, "HH:MM"
    pub reference_time: String,

    pub stops: Vec<StopArrivalsResult>,
}

/// Response for a single stop's arrivals.
#[derive(Debug, Serialize)]
pub struct StopArrivalsResponse {
    pub route_id: String,
    pub reference_time: String,
    pub stop: StopResult,
    pub arrivals: ArrivalsResult,
}

/// Response for the stop nearest a position.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub route_id: String,
    pub reference_time: String,
    pub stop: StopResult,
    pub distance_km: f64,

    /// The next arrival only
    pub next: ArrivalsResult,

    /// Arrivals for the detail list
    pub upcoming: ArrivalsResult,
}

impl NearestResponse {
    /// Create from the nearest-stop summary.
    pub fn from_nearest(route_id: &str, reference_time: String, nearest: &NearestArrivals<'_>) -> Self {
        Self {
            route_id: route_id.to_string(),
            reference_time,
            stop: StopResult::from_route_stop(nearest.stop),
            distance_km: nearest.distance_km,
            next: ArrivalsResult::from_projection(&nearest.next),
            upcoming: ArrivalsResult::from_projection(&nearest.upcoming),
        }
    }
}

/// An intercity trip with its next departures.
#[derive(Debug, Serialize)]
pub struct IntercityResult {
    pub id: String,
    pub destination: String,
    pub company_name: Option<String>,
    pub price: Option<String>,

    /// Full timetable, "HH:MM"
    pub departure_times: Vec<String>,

    /// Departures after the reference time, "HH:MM"
    pub next_departures: Vec<String>,
}

impl IntercityResult {
    /// Create from a domain IntercityTrip.
    pub fn from_trip(trip: &IntercityTrip, after: TimeOfDay, limit: usize) -> Self {
        Self {
            id: trip.id.clone(),
            destination: trip.destination.clone(),
            company_name: trip.company_name.clone(),
            price: trip.price.clone(),
            departure_times: trip.departure_times.iter().map(ToString::to_string).collect(),
            next_departures: trip
                .next_departures(after, limit)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Response for intercity departures.
#[derive(Debug, Serialize)]
pub struct IntercityResponse {
    pub reference_time: String,
    pub trips: Vec<IntercityResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
