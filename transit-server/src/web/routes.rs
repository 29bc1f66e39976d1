//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use futures::future::try_join_all;
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::domain::{ConfigurationError, Coordinates, Route, RouteStop, TimeOfDay};
use crate::schedule::{arrivals_near, project_arrivals, route_board};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/routes", get(list_routes))
        .route("/api/routes/:id/board", get(route_board_handler))
        .route("/api/routes/:id/stops/:stop_id", get(stop_arrivals))
        .route("/api/routes/:id/nearest", get(nearest_arrivals))
        .route("/api/intercity", get(intercity_departures))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page listing the routes.
async fn index_page(State(state): State<AppState>) -> Response {
    let routes = match state.schedule.routes().await {
        Ok(routes) => routes,
        Err(e) => {
            let err = AppError::from(e);
            let status = err.status();
            let template = ErrorTemplate {
                title: "Schedule unavailable".into(),
                message: "Route information could not be loaded. Please try again shortly.".into(),
                details: Some(err.message().to_string()),
            };
            let html = template
                .render()
                .unwrap_or_else(|e| format!("Template error: {}", e));
            return (status, Html(html)).into_response();
        }
    };

    let template = IndexTemplate {
        routes: routes.iter().map(RouteView::from_route).collect(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse an optional `at=HH:MM` query parameter.
fn parse_at(at: Option<&str>) -> Result<Option<TimeOfDay>, AppError> {
    at.filter(|s| !s.is_empty())
        .map(TimeOfDay::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })
}

/// Load a route and its stops, or 404.
async fn load_route(
    state: &AppState,
    route_id: &str,
) -> Result<(Route, Arc<Vec<RouteStop>>), AppError> {
    let route = state
        .schedule
        .route(route_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Route {} not found", route_id),
        })?;
    let stops = state.schedule.route_stops(route_id).await?;
    Ok((route, stops))
}

/// List all routes, with their stops unless `include_stops=false`.
async fn list_routes(
    State(state): State<AppState>,
    Query(req): Query<RoutesQuery>,
) -> Result<Json<RoutesResponse>, AppError> {
    let routes = state.schedule.routes().await?;

    if !req.include_stops.unwrap_or(true) {
        let routes = routes
            .iter()
            .map(|r| RouteResult::from_route(r, None))
            .collect();
        return Ok(Json(RoutesResponse { routes }));
    }

    let stops = try_join_all(routes.iter().map(|r| state.schedule.route_stops(&r.id))).await?;

    let routes = routes
        .iter()
        .zip(stops.iter())
        .map(|(route, stops)| RouteResult::from_route(route, Some(stops.as_slice())))
        .collect();

    Ok(Json(RoutesResponse { routes }))
}

/// Every stop of a route with its projected arrivals.
async fn route_board_handler(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    headers: HeaderMap,
    Query(req): Query<ProjectionQuery>,
) -> Result<Response, AppError> {
    let at = parse_at(req.at.as_deref())?;
    let limit = state
        .projection
        .clamp(req.limit, state.projection.board_limit);

    let (route, stops) = load_route(&state, &route_id).await?;
    let reference = state.reference(at);
    let board = route_board(&route, &stops, &reference, limit)?;

    let reference_time = TimeOfDay::from(reference.time()).to_string();
    debug!(route = %route.id, stops = board.len(), at = %reference_time, "projected board");

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = BoardTemplate {
            route: RouteView::from_route(&route),
            reference_time,
            stops: board.iter().map(BoardStopView::from_stop_arrivals).collect(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(BoardResponse {
            route: RouteResult::from_route(&route, None),
            reference_time,
            stops: board
                .iter()
                .map(StopArrivalsResult::from_stop_arrivals)
                .collect(),
        })
        .into_response())
    }
}

/// Projected arrivals at one stop of a route.
///
/// The stop may be given by its stop id or by its route-stop id.
async fn stop_arrivals(
    State(state): State<AppState>,
    Path((route_id, stop_id)): Path<(String, String)>,
    Query(req): Query<ProjectionQuery>,
) -> Result<Json<StopArrivalsResponse>, AppError> {
    let at = parse_at(req.at.as_deref())?;
    let limit = state
        .projection
        .clamp(req.limit, state.projection.default_limit);

    let (route, stops) = load_route(&state, &route_id).await?;
    let stop = stops
        .iter()
        .find(|s| s.stop.id == stop_id || s.id == stop_id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Stop {} is not on route {}", stop_id, route_id),
        })?;

    let reference = state.reference(at);
    let projection = project_arrivals(&route, &stop.offset, &reference, limit)?;

    Ok(Json(StopArrivalsResponse {
        route_id: route.id,
        reference_time: TimeOfDay::from(reference.time()).to_string(),
        stop: StopResult::from_route_stop(stop),
        arrivals: ArrivalsResult::from_projection(&projection),
    }))
}

/// The stop of a route nearest the caller, with its next arrivals.
async fn nearest_arrivals(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    Query(req): Query<NearestQuery>,
) -> Result<Json<NearestResponse>, AppError> {
    let at = parse_at(req.at.as_deref())?;
    let origin = Coordinates::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let (route, stops) = load_route(&state, &route_id).await?;
    let reference = state.reference(at);

    let nearest = arrivals_near(&route, &stops, origin, &reference, &state.projection)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Route {} has no stops", route_id),
        })?;

    Ok(Json(NearestResponse::from_nearest(
        &route.id,
        TimeOfDay::from(reference.time()).to_string(),
        &nearest,
    )))
}

/// Intercity trips with their next departures.
async fn intercity_departures(
    State(state): State<AppState>,
    Query(req): Query<IntercityQuery>,
) -> Result<Json<IntercityResponse>, AppError> {
    let at = parse_at(req.at.as_deref())?;
    let limit = state
        .projection
        .clamp(req.limit, state.projection.default_limit);
    if limit == 0 {
        return Err(ConfigurationError::ZeroLimit.into());
    }

    let trips = state.schedule.intercity_trips().await?;
    let after = TimeOfDay::from(state.reference(at).time());

    Ok(Json(IntercityResponse {
        reference_time: after.to_string(),
        trips: trips
            .iter()
            .map(|trip| IntercityResult::from_trip(trip, after, limit))
            .collect(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The schedule exists but cannot be projected.
    ScheduleUnavailable { message: String },
    /// The schedule store failed.
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ScheduleUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::ScheduleUnavailable { message }
            | AppError::Upstream { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<ConfigurationError> for AppError {
    fn from(e: ConfigurationError) -> Self {
        match e {
            ConfigurationError::ZeroLimit => AppError::BadRequest {
                message: e.to_string(),
            },
            ConfigurationError::NonPositiveHeadway(_) => AppError::ScheduleUnavailable {
                message: format!("schedule unavailable: {e}"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.message().to_string();

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
