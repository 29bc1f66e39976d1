//! Route-level views built from the projector and stop selection.

use chrono::{DateTime, TimeZone};
use tracing::debug;

use crate::domain::{ConfigurationError, Coordinates, Route, RouteStop};

use super::config::ProjectionConfig;
use super::nearest::nearest_stop;
use super::projector::{Projection, project_arrivals, validate};

/// One stop of a route with its projected arrivals.
#[derive(Debug, Clone, PartialEq)]
pub struct StopArrivals<'a> {
    pub stop: &'a RouteStop,
    pub projection: Projection,
}

/// Project every stop of a route, keeping the stops' order.
///
/// Fails as a whole if the route cannot be projected; there is no partial
/// board.
pub fn route_board<'a, Tz: TimeZone>(
    route: &Route,
    stops: &'a [RouteStop],
    reference: &DateTime<Tz>,
    limit: usize,
) -> Result<Vec<StopArrivals<'a>>, ConfigurationError> {
    validate(route, limit)?;

    if !route.is_same_day_window() {
        debug!(
            route = %route.id,
            start = %route.service_start,
            end = %route.service_end,
            "overnight service window, no trips projected"
        );
    }

    stops
        .iter()
        .map(|stop| {
            Ok(StopArrivals {
                stop,
                projection: project_arrivals(route, &stop.offset, reference, limit)?,
            })
        })
        .collect()
}

/// The stop nearest the caller with its "next bus" summary.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestArrivals<'a> {
    pub stop: &'a RouteStop,
    pub distance_km: f64,
    /// Projection limited to the next arrival only.
    pub next: Projection,
    /// Projection for the detail list.
    pub upcoming: Projection,
}

/// Select the stop nearest `origin` and project its arrivals.
///
/// Returns `Ok(None)` when the route has no stops.
pub fn arrivals_near<'a, Tz: TimeZone>(
    route: &Route,
    stops: &'a [RouteStop],
    origin: Coordinates,
    reference: &DateTime<Tz>,
    config: &ProjectionConfig,
) -> Result<Option<NearestArrivals<'a>>, ConfigurationError> {
    validate(route, config.next_arrival_limit)?;
    validate(route, config.default_limit)?;

    let Some(nearest) = nearest_stop(origin, stops) else {
        return Ok(None);
    };

    let offset = &nearest.stop.offset;
    Ok(Some(NearestArrivals {
        stop: nearest.stop,
        distance_km: nearest.distance_km,
        next: project_arrivals(route, offset, reference, config.next_arrival_limit)?,
        upcoming: project_arrivals(route, offset, reference, config.default_limit)?,
    }))
}
