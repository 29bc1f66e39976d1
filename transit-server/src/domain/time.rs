//! Time-of-day handling for schedule data.
//!
//! The schedule store serves service windows as "HH:MM:SS" strings (the
//! store's `time` columns), while intercity departure lists are usually
//! "HH:MM". Everything the projector hands back is rendered as "HH:MM".

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day from a daily schedule.
///
/// Carries no date: a route's service window is re-applied every day, so
/// the date only appears once a time is anchored to a reference instant.
///
/// # Examples
///
/// ```
/// use transit_server::domain::TimeOfDay;
///
/// let start = TimeOfDay::parse("07:00:00").unwrap();
/// assert_eq!(start.to_string(), "07:00");
///
/// let departure = TimeOfDay::parse("14:30").unwrap();
/// assert!(start < departure);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Create a time from hour and minute, seconds zero.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse "HH:MM" or "HH:MM:SS".
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse("00:00").is_ok());
    /// assert!(TimeOfDay::parse("23:59:59").is_ok());
    ///
    /// assert!(TimeOfDay::parse("7:00").is_err());
    /// assert!(TimeOfDay::parse("24:00:00").is_err());
    /// assert!(TimeOfDay::parse("12:00:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new("expected colon at position 5"));
            }
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new("second must be 0-59"));
            }
            second
        } else {
            0
        };

        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Anchor this time, truncated to whole minutes, to a calendar date.
    ///
    /// Schedules are minute-granular; stray seconds in the store are dropped.
    pub fn on_date(&self, date: NaiveDate) -> NaiveDateTime {
        let time = self
            .0
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(self.0);
        date.and_time(time)
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeOfDay({:02}:{:02}:{:02})",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self(time)
    }
}

/// A projected arrival at a stop, in local wall-clock time.
///
/// Keeps the date so ordering stays correct when a stop offset pushes the
/// last trips of the day past midnight. Displays as "HH:MM".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrivalTime(NaiveDateTime);

impl ArrivalTime {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Returns the local date-time of the arrival.
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Debug for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArrivalTime({} {:02}:{:02})",
            self.0.date(),
            self.0.hour(),
            self.0.minute()
        )
    }
}

impl fmt::Display for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_hms()(hour in 0u32..24, minute in 0u32..60, second in 0u32..60) -> String {
            format!("{:02}:{:02}:{:02}", hour, minute, second)
        }
    }

    proptest! {
        /// Any valid HH:MM:SS string parses and displays as its HH:MM prefix
        #[test]
        fn hms_parses_and_displays_prefix(s in valid_hms()) {
            let t = TimeOfDay::parse(&s).unwrap();
            prop_assert_eq!(t.to_string(), s[..5].to_string());
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}:00", hour, minute);
            prop_assert!(TimeOfDay::parse(&s).is_err());
        }

        /// Ordering agrees with seconds since midnight
        #[test]
        fn ordering_matches_seconds(a in valid_hms(), b in valid_hms()) {
            let ta = TimeOfDay::parse(&a).unwrap();
            let tb = TimeOfDay::parse(&b).unwrap();
            let secs = |t: TimeOfDay| t.hour() * 3600 + t.minute() * 60 + t.second();
            prop_assert_eq!(ta.cmp(&tb), secs(ta).cmp(&secs(tb)));
        }
    }
}
