//! Caching layer for schedule store reads.
//!
//! Schedules change rarely (an admin edits a route a few times a year) but
//! every board view needs the route list and the route's stops. Reads are
//! cached with a TTL; projections are never cached since they depend on
//! the current time and are cheap to recompute.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{IntercityTrip, Route, RouteStop};
use crate::store::{ScheduleSource, StoreError};

/// Cached route list.
type RoutesEntry = Arc<Vec<Route>>;

/// Cached stops of one route.
type StopsEntry = Arc<Vec<RouteStop>>;

/// Cached intercity trips.
type TripsEntry = Arc<Vec<IntercityTrip>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached route stop lists.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 256,
        }
    }
}

/// Schedule source with caching.
pub struct CachedSchedule {
    source: ScheduleSource,
    routes: MokaCache<(), RoutesEntry>,
    stops: MokaCache<String, StopsEntry>,
    intercity: MokaCache<(), TripsEntry>,
}

impl CachedSchedule {
    /// Create a new cached source.
    pub fn new(source: ScheduleSource, config: &CacheConfig) -> Self {
        Self {
            source,
            routes: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(1)
                .build(),
            stops: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            intercity: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(1)
                .build(),
        }
    }

    /// All routes, using the cache if available.
    pub async fn routes(&self) -> Result<RoutesEntry, StoreError> {
        if let Some(cached) = self.routes.get(&()).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.source.fetch_routes().await?);
        debug!(count = entry.len(), "cached route list");
        self.routes.insert((), entry.clone()).await;

        Ok(entry)
    }

    /// Look up one route by id.
    pub async fn route(&self, route_id: &str) -> Result<Option<Route>, StoreError> {
        let routes = self.routes().await?;
        Ok(routes.iter().find(|r| r.id == route_id).cloned())
    }

    /// Stops of one route, using the cache if available.
    pub async fn route_stops(&self, route_id: &str) -> Result<StopsEntry, StoreError> {
        if let Some(cached) = self.stops.get(route_id).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.source.fetch_route_stops(route_id).await?);
        debug!(route = route_id, count = entry.len(), "cached route stops");
        self.stops.insert(route_id.to_string(), entry.clone()).await;

        Ok(entry)
    }

    /// Intercity trips, using the cache if available.
    pub async fn intercity_trips(&self) -> Result<TripsEntry, StoreError> {
        if let Some(cached) = self.intercity.get(&()).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.source.fetch_intercity_trips().await?);
        self.intercity.insert((), entry.clone()).await;

        Ok(entry)
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
        self.stops.invalidate_all();
        self.intercity.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockData, MockScheduleStore, RouteDto};

    fn route_dto(id: &str, title: &str) -> RouteDto {
        RouteDto {
            id: id.into(),
            title: title.into(),
            start_time: "07:00:00".into(),
            end_time: "23:00:00".into(),
            frequency_min: 30,
        }
    }

    fn data(routes: Vec<RouteDto>) -> MockData {
        MockData {
            routes,
            ..MockData::default()
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 256);
    }

    #[tokio::test]
    async fn serves_cached_routes_until_invalidated() {
        let store = MockScheduleStore::new(data(vec![route_dto("r1", "Merkez")]));
        let cached = CachedSchedule::new(
            ScheduleSource::Mock(store.clone()),
            &CacheConfig::default(),
        );

        assert_eq!(cached.routes().await.unwrap().len(), 1);

        store
            .replace(data(vec![route_dto("r1", "Merkez"), route_dto("r2", "Sanayi")]))
            .await;
        assert_eq!(cached.routes().await.unwrap().len(), 1);

        cached.invalidate_all();
        assert_eq!(cached.routes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn route_lookup_by_id() {
        let store = MockScheduleStore::new(data(vec![
            route_dto("r1", "Merkez"),
            route_dto("r2", "Sanayi"),
        ]));
        let cached = CachedSchedule::new(ScheduleSource::Mock(store), &CacheConfig::default());

        assert_eq!(cached.route("r2").await.unwrap().unwrap().title, "Sanayi");
        assert!(cached.route("r3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_stop_lists_are_cached_too() {
        let store = MockScheduleStore::default();
        let cached = CachedSchedule::new(ScheduleSource::Mock(store), &CacheConfig::default());

        assert!(cached.route_stops("r1").await.unwrap().is_empty());
        assert!(cached.route_stops("r1").await.unwrap().is_empty());
    }
}
