//! Schedule store access.
//!
//! The store owns routes, stops and intercity trips; this server only
//! reads them. Rows are converted to domain types at this boundary, and
//! rows that fail conversion are logged and skipped.
//!
//! Two backends are available: the REST client for a real store, and a
//! fixture-backed mock for development and tests.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{ScheduleClient, ScheduleClientConfig};
pub use convert::{
    ConversionError, convert_all, convert_intercity_trip, convert_route, convert_route_stop,
};
pub use error::StoreError;
pub use mock::{MockData, MockScheduleStore};
pub use types::{IntercityTripDto, RouteDto, RouteStopDto, StopDto};

use crate::domain::{IntercityTrip, Route, RouteStop};

/// Where schedule data comes from.
#[derive(Clone)]
pub enum ScheduleSource {
    Http(ScheduleClient),
    Mock(MockScheduleStore),
}

impl ScheduleSource {
    pub async fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        match self {
            ScheduleSource::Http(client) => client.fetch_routes().await,
            ScheduleSource::Mock(store) => store.fetch_routes().await,
        }
    }

    pub async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<RouteStop>, StoreError> {
        match self {
            ScheduleSource::Http(client) => client.fetch_route_stops(route_id).await,
            ScheduleSource::Mock(store) => store.fetch_route_stops(route_id).await,
        }
    }

    pub async fn fetch_intercity_trips(&self) -> Result<Vec<IntercityTrip>, StoreError> {
        match self {
            ScheduleSource::Http(client) => client.fetch_intercity_trips().await,
            ScheduleSource::Mock(store) => store.fetch_intercity_trips().await,
        }
    }
}
