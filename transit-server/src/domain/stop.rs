//! Stops and their locations.

use super::StopOffset;

/// Error returned for coordinates outside the valid WGS84 range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use transit_server::domain::Coordinates;
///
/// let kadirli = Coordinates::new(37.3742, 36.0963).unwrap();
/// assert_eq!(kadirli.latitude, 37.3742);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinates {
                reason: "must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                reason: "latitude must be between -90 and 90",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                reason: "longitude must be between -180 and 180",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// As a `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Anything with a position on the map.
pub trait Located {
    fn location(&self) -> Coordinates;
}

impl Located for Coordinates {
    fn location(&self) -> Coordinates {
        *self
    }
}

/// A physical stop shared between routes.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub location: Coordinates,
}

impl Located for Stop {
    fn location(&self) -> Coordinates {
        self.location
    }
}

/// A stop as served by one route: the stop plus its offset from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub id: String,
    pub offset: StopOffset,
    pub stop: Stop,
}

impl Located for RouteStop {
    fn location(&self) -> Coordinates {
        self.stop.location
    }
}
