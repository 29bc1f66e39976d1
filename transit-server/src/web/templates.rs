//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Route, RouteStop};
use crate::schedule::StopArrivals;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page listing routes.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub routes: Vec<RouteView>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route board fragment: every stop with its upcoming arrivals.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub route: RouteView,
    pub reference_time: String,
    pub stops: Vec<BoardStopView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub id: String,
    pub title: String,
    pub service_start: String,
    pub service_end: String,
    pub headway_minutes: i64,
}

impl RouteView {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.clone(),
            title: route.title.clone(),
            service_start: route.service_start.to_string(),
            service_end: route.service_end.to_string(),
            headway_minutes: route.headway_minutes,
        }
    }

    /// e.g. "07:00 - 23:00, every 30 min"
    pub fn service_summary(&self) -> String {
        format!(
            "{} - {}, every {} min",
            self.service_start, self.service_end, self.headway_minutes
        )
    }
}

/// One row of a route board.
#[derive(Debug, Clone)]
pub struct BoardStopView {
    pub name: String,
    pub minutes_from_origin: u32,
    /// "HH:MM" arrivals, or the service-ended marker
    pub times: Vec<String>,
    pub service_ended: bool,
}

impl BoardStopView {
    /// Create from a board row.
    pub fn from_stop_arrivals(row: &StopArrivals<'_>) -> Self {
        Self::new(row.stop, row.projection.to_strings(), row.projection.is_service_ended())
    }

    fn new(stop: &RouteStop, times: Vec<String>, service_ended: bool) -> Self {
        Self {
            name: stop.stop.name.clone(),
            minutes_from_origin: stop.offset.minutes_from_origin,
            times,
            service_ended,
        }
    }

    /// The first time shown for the stop.
    pub fn next_time(&self) -> &str {
        self.times.first().map(String::as_str).unwrap_or_default()
    }

    /// Times after the first.
    pub fn later_times(&self) -> &[String] {
        self.times.get(1..).unwrap_or_default()
    }
}
