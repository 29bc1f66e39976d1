//! Application state for the web layer.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::cache::CachedSchedule;
use crate::domain::TimeOfDay;
use crate::schedule::ProjectionConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached schedule store
    pub schedule: Arc<CachedSchedule>,

    /// Arrival limits for the different views
    pub projection: Arc<ProjectionConfig>,

    /// Zone the schedules are published in
    pub timezone: FixedOffset,
}

impl AppState {
    /// Create a new app state.
    pub fn new(schedule: CachedSchedule, projection: ProjectionConfig, timezone: FixedOffset) -> Self {
        Self {
            schedule: Arc::new(schedule),
            projection: Arc::new(projection),
            timezone,
        }
    }

    /// The current time in the schedule's zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// The reference time for a request: today at `at` if given, else now.
    pub fn reference(&self, at: Option<TimeOfDay>) -> DateTime<FixedOffset> {
        let now = self.now();
        match at {
            // A fixed offset has exactly one instant per local time.
            Some(time) => time
                .on_date(now.date_naive())
                .and_local_timezone(self.timezone)
                .single()
                .unwrap_or(now),
            None => now,
        }
    }
}
