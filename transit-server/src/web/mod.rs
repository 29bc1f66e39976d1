//! Web layer for the transit schedule server.
//!
//! Provides HTTP endpoints for route boards, stop arrivals, the nearest
//! stop and intercity departures.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
