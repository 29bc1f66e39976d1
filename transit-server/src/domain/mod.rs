//! Domain types for the transit schedule server.
//!
//! These types represent schedule data after it has been read from the
//! store. Time strings are parsed into typed values at the boundary, so
//! the projector and the web layer never handle raw strings.

mod error;
mod intercity;
mod route;
mod stop;
mod time;

pub use error::ConfigurationError;
pub use intercity::IntercityTrip;
pub use route::{Route, StopOffset};
pub use stop::{Coordinates, InvalidCoordinates, Located, RouteStop, Stop};
pub use time::{ArrivalTime, TimeError, TimeOfDay};
