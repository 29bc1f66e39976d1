//! Schedule store HTTP client.
//!
//! Reads routes, route stops and intercity trips from the store's REST
//! interface (PostgREST query syntax: `column=eq.value`, `order=col.asc`,
//! embedded selects for joins).

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{IntercityTrip, Route, RouteStop};

use super::convert::{convert_all, convert_intercity_trip, convert_route, convert_route_stop};
use super::error::StoreError;
use super::types::{IntercityTripDto, RouteDto, RouteStopDto};

/// Default base URL: a locally running store.
const DEFAULT_BASE_URL: &str = "http://localhost:54321/rest/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the schedule store client.
#[derive(Debug, Clone)]
pub struct ScheduleClientConfig {
    /// API key, sent as `apikey` and as a bearer token
    pub api_key: String,
    /// Base URL of the REST interface
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ScheduleClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Schedule store API client.
///
/// Uses a semaphore to cap concurrent requests to the store.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl ScheduleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ScheduleClientConfig) -> Result<Self, StoreError> {
        let invalid_key = || StoreError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            HeaderValue::from_str(&config.api_key).map_err(|_| invalid_key())?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| invalid_key())?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch all routes, ordered by title.
    pub async fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        let rows: Vec<RouteDto> = self
            .get_json("transport_routes", &[("order", "title.asc".to_string())])
            .await?;
        Ok(convert_all(&rows, convert_route))
    }

    /// Fetch the stops of one route in travel order, each with its stop row.
    pub async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<RouteStop>, StoreError> {
        let rows: Vec<RouteStopDto> = self
            .get_json(
                "transport_route_stops",
                &[
                    ("route_id", format!("eq.{route_id}")),
                    ("select", "*,stop:transport_stops(*)".to_string()),
                    ("order", "stop_order.asc".to_string()),
                ],
            )
            .await?;
        Ok(convert_all(&rows, convert_route_stop))
    }

    /// Fetch all intercity trips, ordered by destination.
    pub async fn fetch_intercity_trips(&self) -> Result<Vec<IntercityTrip>, StoreError> {
        let rows: Vec<IntercityTripDto> = self
            .get_json("intercity_trips", &[("order", "destination.asc".to_string())])
            .await?;
        Ok(convert_all(&rows, convert_intercity_trip))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<T, StoreError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| StoreError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, table);
        debug!(%url, "fetching from schedule store");

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StoreError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| StoreError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
