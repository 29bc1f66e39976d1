//! Nearest-stop selection by great-circle distance.

use geo::{Haversine, Length, line_string};

use crate::domain::{Coordinates, Located};

/// Haversine distance between two points, in kilometres.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let (src, dst) = (from.to_point(), to.to_point());
    let line = line_string![src.0, dst.0];
    Haversine.length(&line) / 1000.0
}

/// A selected stop and how far it is from the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestStop<'a, T> {
    pub stop: &'a T,
    pub distance_km: f64,
}

/// Pick the stop closest to `origin`.
///
/// Returns `None` for an empty stop set. When two stops are equally close
/// the one listed first wins, so the choice is stable for a given input.
///
/// # Examples
///
/// ```
/// use transit_server::domain::Coordinates;
/// use transit_server::schedule::nearest_stop;
///
/// let here = Coordinates::new(37.3742, 36.0963).unwrap();
/// let stops = [
///     Coordinates::new(37.40, 36.10).unwrap(),
///     Coordinates::new(37.375, 36.097).unwrap(),
/// ];
///
/// let nearest = nearest_stop(here, &stops).unwrap();
/// assert_eq!(*nearest.stop, stops[1]);
///
/// let none: [Coordinates; 0] = [];
/// assert!(nearest_stop(here, &none).is_none());
/// ```
pub fn nearest_stop<T: Located>(origin: Coordinates, stops: &[T]) -> Option<NearestStop<'_, T>> {
    stops
        .iter()
        .map(|stop| NearestStop {
            stop,
            distance_km: distance_km(origin, stop.location()),
        })
        .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Kilometres per degree of latitude on the mean-radius sphere.
    const KM_PER_DEGREE: f64 = 6_371.008_8 * std::f64::consts::PI / 180.0;

    fn origin() -> Coordinates {
        Coordinates::new(37.3742, 36.0963).unwrap()
    }

    /// A point due north of the origin at roughly `km` kilometres.
    fn north_of_origin(km: f64) -> Coordinates {
        let o = origin();
        Coordinates::new(o.latitude + km / KM_PER_DEGREE, o.longitude).unwrap()
    }

    #[test]
    fn zero_distance() {
        assert!(distance_km(origin(), origin()).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = origin();
        let b = Coordinates::new(37.0, 35.3).unwrap();
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn distance_along_meridian() {
        let d = distance_km(origin(), north_of_origin(5.2));
        assert!((d - 5.2).abs() < 0.05, "got {d}");
    }

    #[test]
    fn picks_closest_of_three() {
        let stops = [
            north_of_origin(5.2),
            north_of_origin(1.1),
            north_of_origin(9.8),
        ];
        let nearest = nearest_stop(origin(), &stops).unwrap();
        assert_eq!(*nearest.stop, stops[1]);
        assert!((nearest.distance_km - 1.1).abs() < 0.05);
    }

    #[test]
    fn empty_set_selects_nothing() {
        let stops: Vec<Coordinates> = Vec::new();
        assert!(nearest_stop(origin(), &stops).is_none());
    }

    #[test]
    fn tie_goes_to_first_listed() {
        let far = north_of_origin(3.0);
        let near = north_of_origin(0.5);
        let stops = [far, near, near];

        let nearest = nearest_stop(origin(), &stops).unwrap();
        assert!(std::ptr::eq(nearest.stop, &stops[1]));
    }
}
