//! Route and stop-offset types.

use chrono::Duration;

use super::TimeOfDay;

/// A recurring in-town line with a daily service window and fixed headway.
///
/// Values come straight from the schedule store and are not validated on
/// construction: a bad headway is a data problem that the projector
/// reports as [`ConfigurationError`](super::ConfigurationError) at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Store identifier (a UUID string)
    pub id: String,

    /// Display name, e.g. "Merkez - Hastane"
    pub title: String,

    /// First departure from the origin each day
    pub service_start: TimeOfDay,

    /// Last departure from the origin each day (inclusive)
    pub service_end: TimeOfDay,

    /// Minutes between consecutive departures
    pub headway_minutes: i64,
}

impl Route {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        service_start: TimeOfDay,
        service_end: TimeOfDay,
        headway_minutes: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            service_start,
            service_end,
            headway_minutes,
        }
    }

    /// Whether the window runs forward within a single day.
    ///
    /// Overnight windows (end before start) are not supported and project
    /// no trips.
    pub fn is_same_day_window(&self) -> bool {
        self.service_start <= self.service_end
    }
}

/// Minutes from a trip's origin departure to its arrival at one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StopOffset {
    pub minutes_from_origin: u32,
}

impl StopOffset {
    pub fn new(minutes_from_origin: u32) -> Self {
        Self {
            minutes_from_origin,
        }
    }

    /// The offset as a chrono duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes_from_origin))
    }
}
