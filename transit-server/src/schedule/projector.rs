//! Arrival-time projection for headway-based routes.
//!
//! A route runs one trip every `headway_minutes` from `service_start` to
//! `service_end` (inclusive), every day. A trip reaches a stop
//! `minutes_from_origin` after it leaves the origin. Given "now", the
//! projector walks today's trips in order and keeps the arrivals that are
//! still ahead.

use chrono::{DateTime, Duration, TimeZone};
use tracing::trace;

use crate::domain::{ArrivalTime, ConfigurationError, Route, StopOffset};

/// Text shown in place of times once a stop has seen its last trip today.
pub const SERVICE_ENDED: &str = "Sefer Bitti";

/// A headway longer than a day can only ever fit one trip in the window.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Result of projecting a route onto one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Upcoming arrivals, strictly ascending, never empty.
    Arrivals(Vec<ArrivalTime>),

    /// No trip will reach the stop again today. This is a normal state,
    /// not an error.
    ServiceEnded,
}

impl Projection {
    /// The projected arrivals (empty once service has ended).
    pub fn arrivals(&self) -> &[ArrivalTime] {
        match self {
            Projection::Arrivals(times) => times,
            Projection::ServiceEnded => &[],
        }
    }

    /// The first upcoming arrival, if any.
    pub fn next(&self) -> Option<ArrivalTime> {
        self.arrivals().first().copied()
    }

    /// Whether no further trips reach the stop today.
    pub fn is_service_ended(&self) -> bool {
        matches!(self, Projection::ServiceEnded)
    }

    /// Render as display strings: `"HH:MM"` entries, or exactly one
    /// [`SERVICE_ENDED`] entry.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Projection::Arrivals(times) => times.iter().map(ToString::to_string).collect(),
            Projection::ServiceEnded => vec![SERVICE_ENDED.to_string()],
        }
    }
}

/// Check that `route` can be projected with `limit`.
pub fn validate(route: &Route, limit: usize) -> Result<(), ConfigurationError> {
    if route.headway_minutes <= 0 {
        return Err(ConfigurationError::NonPositiveHeadway(route.headway_minutes));
    }
    if limit == 0 {
        return Err(ConfigurationError::ZeroLimit);
    }
    Ok(())
}

/// Project the next `limit` arrivals at `stop` after `reference`.
///
/// The service window is anchored to the local calendar date of
/// `reference`, in whatever zone `reference` carries. Arithmetic happens on
/// local wall-clock time, so a timetable reading "every 30 minutes from
/// 07:00" keeps its printed times across a DST change.
///
/// # Errors
///
/// Returns `Err` before doing any work if:
/// - `route.headway_minutes <= 0`
/// - `limit == 0`
///
/// An overnight window (`service_end` before `service_start`) is not an
/// error; it projects no trips and yields [`Projection::ServiceEnded`].
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use transit_server::domain::{Route, StopOffset, TimeOfDay};
/// use transit_server::schedule::project_arrivals;
///
/// let route = Route::new(
///     "r1",
///     "Merkez",
///     TimeOfDay::parse("07:00:00").unwrap(),
///     TimeOfDay::parse("23:00:00").unwrap(),
///     30,
/// );
/// let tz = FixedOffset::east_opt(3 * 3600).unwrap();
/// let now = tz.with_ymd_and_hms(2024, 3, 15, 8, 5, 0).unwrap();
///
/// let projection = project_arrivals(&route, &StopOffset::new(10), &now, 3).unwrap();
/// assert_eq!(projection.to_strings(), ["08:10", "08:40", "09:10"]);
/// ```
pub fn project_arrivals<Tz: TimeZone>(
    route: &Route,
    stop: &StopOffset,
    reference: &DateTime<Tz>,
    limit: usize,
) -> Result<Projection, ConfigurationError> {
    validate(route, limit)?;

    let now = reference.naive_local();
    let today = now.date();
    let today_end = route.service_end.on_date(today);
    let headway = Duration::minutes(route.headway_minutes.min(MINUTES_PER_DAY));
    let offset = stop.duration();

    let mut arrivals = Vec::new();
    let mut departure = route.service_start.on_date(today);

    while departure <= today_end && arrivals.len() < limit {
        let Some(arrival) = departure.checked_add_signed(offset) else {
            break;
        };
        if arrival > now {
            arrivals.push(ArrivalTime::new(arrival));
        }

        let Some(next) = departure.checked_add_signed(headway) else {
            break;
        };
        departure = next;
    }

    trace!(
        route = %route.id,
        offset = stop.minutes_from_origin,
        count = arrivals.len(),
        "projected arrivals"
    );

    if arrivals.is_empty() {
        Ok(Projection::ServiceEnded)
    } else {
        Ok(Projection::Arrivals(arrivals))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TimeOfDay;
    use chrono::{FixedOffset, NaiveTime};
    use proptest::prelude::*;

    prop_compose! {
        fn valid_route()(
            start_mins in 0u32..1440,
            span_mins in 0u32..1440,
            headway in 1i64..240,
        ) -> Route {
            let end_mins = (start_mins + span_mins).min(1439);
            let start = TimeOfDay::new(start_mins / 60, start_mins % 60).unwrap();
            let end = TimeOfDay::new(end_mins / 60, end_mins % 60).unwrap();
            Route::new("r", "Test", start, end, headway)
        }
    }

    prop_compose! {
        fn reference()(secs in 0u32..86400) -> DateTime<FixedOffset> {
            let tz = FixedOffset::east_opt(3 * 3600).unwrap();
            let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap();
            let naive = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_time(time);
            tz.from_local_datetime(&naive).single().unwrap()
        }
    }

    proptest! {
        /// Output is strictly increasing
        #[test]
        fn strictly_ascending(
            route in valid_route(),
            offset in 0u32..600,
            now in reference(),
            limit in 1usize..50,
        ) {
            let p = project_arrivals(&route, &StopOffset::new(offset), &now, limit).unwrap();
            let times = p.arrivals();
            for pair in times.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        /// Never more entries than the limit, and never an empty list
        #[test]
        fn bounded_by_limit(
            route in valid_route(),
            offset in 0u32..600,
            now in reference(),
            limit in 1usize..50,
        ) {
            let p = project_arrivals(&route, &StopOffset::new(offset), &now, limit).unwrap();
            prop_assert!(p.arrivals().len() <= limit);
            prop_assert!(!p.to_strings().is_empty());
            if let Projection::Arrivals(times) = &p {
                prop_assert!(!times.is_empty());
            }
        }

        /// Every arrival is after the reference instant
        #[test]
        fn all_arrivals_in_future(
            route in valid_route(),
            offset in 0u32..600,
            now in reference(),
        ) {
            let p = project_arrivals(&route, &StopOffset::new(offset), &now, 20).unwrap();
            for t in p.arrivals() {
                prop_assert!(t.datetime() > now.naive_local());
            }
        }

        /// Same input, same output
        #[test]
        fn idempotent(
            route in valid_route(),
            offset in 0u32..600,
            now in reference(),
            limit in 1usize..50,
        ) {
            let stop = StopOffset::new(offset);
            let first = project_arrivals(&route, &stop, &now, limit).unwrap();
            let second = project_arrivals(&route, &stop, &now, limit).unwrap();
            prop_assert_eq!(first, second);
        }

        /// A later reference on the same day only ever drops arrivals
        #[test]
        fn later_reference_is_subsequence(
            route in valid_route(),
            offset in 0u32..600,
            t1 in reference(),
            t2 in reference(),
            limit in 1usize..50,
        ) {
            let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            let stop = StopOffset::new(offset);
            let everything = project_arrivals(&route, &stop, &early, 2000).unwrap();
            let later = project_arrivals(&route, &stop, &late, limit).unwrap();
            for t in later.arrivals() {
                prop_assert!(everything.arrivals().contains(t));
            }
        }

        /// Past the last trip's arrival, only the sentinel remains
        #[test]
        fn sentinel_after_service_end(
            start_mins in 0u32..1200,
            span_mins in 0u32..1200,
            headway in 1i64..240,
            offset in 0u32..120,
            limit in 1usize..50,
        ) {
            let end_mins = (start_mins + span_mins).min(1199);
            let route = Route::new(
                "r",
                "Test",
                TimeOfDay::new(start_mins / 60, start_mins % 60).unwrap(),
                TimeOfDay::new(end_mins / 60, end_mins % 60).unwrap(),
                headway,
            );
            let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let last_arrival =
                route.service_end.on_date(day) + Duration::minutes(i64::from(offset));
            let tz = FixedOffset::east_opt(3 * 3600).unwrap();
            let now = tz
                .from_local_datetime(&(last_arrival + Duration::seconds(1)))
                .single()
                .unwrap();
            let p = project_arrivals(&route, &StopOffset::new(offset), &now, limit).unwrap();
            prop_assert!(p.is_service_ended());
        }

        /// Non-positive headway is always rejected
        #[test]
        fn non_positive_headway_rejected(
            headway in i64::MIN..=0,
            now in reference(),
            limit in 1usize..50,
        ) {
            let route = Route::new(
                "r",
                "Test",
                TimeOfDay::new(7, 0).unwrap(),
                TimeOfDay::new(23, 0).unwrap(),
                headway,
            );
            let err = project_arrivals(&route, &StopOffset::new(0), &now, limit).unwrap_err();
            prop_assert_eq!(err, ConfigurationError::NonPositiveHeadway(headway));
        }
    }
}
