//! Schedule projection.
//!
//! Turns a route's static daily schedule into concrete upcoming arrival
//! times at a stop, relative to a caller-supplied instant, and picks the
//! stop closest to a caller's position.
//!
//! Everything here is synchronous and pure. Callers supply "now" and
//! decide when to re-run a projection.

mod board;
mod config;
mod nearest;
mod projector;

pub use board::{NearestArrivals, StopArrivals, arrivals_near, route_board};
pub use config::ProjectionConfig;
pub use nearest::{NearestStop, distance_km, nearest_stop};
pub use projector::{Projection, SERVICE_ENDED, project_arrivals, validate};
