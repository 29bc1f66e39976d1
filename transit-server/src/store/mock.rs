//! Mock schedule store for running without a database.
//!
//! Loads a JSON fixture shaped like the store's tables and serves it as if
//! it came from the REST interface:
//!
//! ```json
//! {
//!   "routes": [{"id": "r1", "title": "...", "start_time": "07:00:00", ...}],
//!   "route_stops": {"r1": [{"id": "rs1", "minutes_from_start": 0, "stop": {...}}]},
//!   "intercity_trips": [{"id": "t1", "destination": "Adana", ...}]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::{IntercityTrip, Route, RouteStop};

use super::convert::{convert_all, convert_intercity_trip, convert_route, convert_route_stop};
use super::error::StoreError;
use super::types::{IntercityTripDto, RouteDto, RouteStopDto};

/// Raw fixture contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockData {
    #[serde(default)]
    pub routes: Vec<RouteDto>,

    /// Route stops keyed by route id, in travel order.
    #[serde(default)]
    pub route_stops: HashMap<String, Vec<RouteStopDto>>,

    #[serde(default)]
    pub intercity_trips: Vec<IntercityTripDto>,
}

/// Mock store that serves data from memory.
#[derive(Clone, Default)]
pub struct MockScheduleStore {
    data: Arc<RwLock<MockData>>,
}

impl MockScheduleStore {
    /// Create a store over the given data.
    pub fn new(data: MockData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let data: MockData = serde_json::from_str(json)
            .map_err(|e| StoreError::Mock(format!("Failed to parse fixture: {e}")))?;
        Ok(Self::new(data))
    }

    /// Load a fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Mock(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Replace the served data.
    pub async fn replace(&self, data: MockData) {
        *self.data.write().await = data;
    }

    /// All routes, ordered by title like the real store.
    pub async fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        let data = self.data.read().await;
        let mut routes = convert_all(&data.routes, convert_route);
        routes.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(routes)
    }

    /// Stops of one route. An unknown route has no stops.
    pub async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<RouteStop>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .route_stops
            .get(route_id)
            .map(|rows| convert_all(rows, convert_route_stop))
            .unwrap_or_default())
    }

    /// All intercity trips, ordered by destination.
    pub async fn fetch_intercity_trips(&self) -> Result<Vec<IntercityTrip>, StoreError> {
        let data = self.data.read().await;
        let mut trips = convert_all(&data.intercity_trips, convert_intercity_trip);
        trips.sort_by(|a, b| a.destination.cmp(&b.destination));
        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "routes": [
            {"id": "r2", "title": "Sanayi", "start_time": "06:00:00",
             "end_time": "20:00:00", "frequency_min": 60},
            {"id": "r1", "title": "Merkez - Hastane", "start_time": "07:00:00",
             "end_time": "23:00:00", "frequency_min": 30}
        ],
        "route_stops": {
            "r1": [
                {"id": "rs1", "minutes_from_start": 0,
                 "stop": {"id": "s1", "name": "Otogar", "latitude": 37.37, "longitude": 36.09}}
            ]
        },
        "intercity_trips": [
            {"id": "t2", "destination": "Osmaniye", "departure_times": ["09:00"]},
            {"id": "t1", "destination": "Adana", "departure_times": ["08:00", "18:00"]}
        ]
    }"#;

    #[tokio::test]
    async fn serves_fixture_in_store_order() {
        let store = MockScheduleStore::from_json(FIXTURE).unwrap();

        let routes = store.fetch_routes().await.unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].title, "Merkez - Hastane");

        let trips = store.fetch_intercity_trips().await.unwrap();
        assert_eq!(trips[0].destination, "Adana");
    }

    #[tokio::test]
    async fn unknown_route_has_no_stops() {
        let store = MockScheduleStore::from_json(FIXTURE).unwrap();
        assert_eq!(store.fetch_route_stops("r1").await.unwrap().len(), 1);
        assert!(store.fetch_route_stops("r2").await.unwrap().is_empty());
        assert!(store.fetch_route_stops("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let store = MockScheduleStore::from_file(file.path()).unwrap();
        assert_eq!(store.fetch_routes().await.unwrap().len(), 2);
    }

    #[test]
    fn missing_file_is_error() {
        let result = MockScheduleStore::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(StoreError::Mock(_))));
    }

    #[test]
    fn malformed_fixture_is_error() {
        assert!(matches!(
            MockScheduleStore::from_json("{\"routes\": 3}"),
            Err(StoreError::Mock(_))
        ));
    }

    #[tokio::test]
    async fn replace_swaps_data() {
        let store = MockScheduleStore::from_json(FIXTURE).unwrap();
        store.replace(MockData::default()).await;
        assert!(store.fetch_routes().await.unwrap().is_empty());
    }
}
