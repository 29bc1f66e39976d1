//! Schedule store response DTOs.
//!
//! These map the store's JSON rows as served by its REST interface
//! (snake_case column names). The camelCase spellings used by the admin
//! backend are accepted as aliases so either source can be pointed at.

use serde::{Deserialize, Serialize};

/// A row of `transport_routes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDto {
    pub id: String,

    pub title: String,

    /// First departure, "HH:MM:SS".
    #[serde(alias = "startTime", alias = "serviceStart")]
    pub start_time: String,

    /// Last departure, "HH:MM:SS".
    #[serde(alias = "endTime", alias = "serviceEnd")]
    pub end_time: String,

    /// Headway in minutes. Signed so bad data survives parsing and is
    /// reported at projection time.
    #[serde(alias = "frequencyMin", alias = "headwayMinutes")]
    pub frequency_min: i64,
}

/// A row of `transport_stops`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A row of `transport_route_stops` with its stop embedded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteStopDto {
    pub id: String,

    #[serde(alias = "minutesFromStart", alias = "minutesFromOrigin")]
    pub minutes_from_start: i64,

    pub stop: StopDto,
}

/// A row of `intercity_trips`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntercityTripDto {
    pub id: String,

    pub destination: String,

    #[serde(default, alias = "companyName")]
    pub company_name: Option<String>,

    /// Departure times, "HH:MM" or "HH:MM:SS".
    #[serde(default, alias = "departureTimes")]
    pub departure_times: Vec<String>,

    #[serde(default)]
    pub price: Option<String>,
}
