//! Intercity coach trips.

use super::TimeOfDay;

/// An out-of-town coach line with an explicit list of daily departures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntercityTrip {
    pub id: String,
    pub destination: String,
    pub company_name: Option<String>,
    /// Daily departure times, sorted ascending.
    pub departure_times: Vec<TimeOfDay>,
    /// Ticket price as the operator publishes it (e.g. "450 TL").
    pub price: Option<String>,
}

impl IntercityTrip {
    /// Build a trip, sorting and de-duplicating its departures.
    pub fn new(
        id: impl Into<String>,
        destination: impl Into<String>,
        company_name: Option<String>,
        mut departure_times: Vec<TimeOfDay>,
        price: Option<String>,
    ) -> Self {
        departure_times.sort();
        departure_times.dedup();
        Self {
            id: id.into(),
            destination: destination.into(),
            company_name,
            departure_times,
            price,
        }
    }

    /// Departures strictly after `after`, earliest first, at most `limit`.
    pub fn next_departures(&self, after: TimeOfDay, limit: usize) -> Vec<TimeOfDay> {
        self.departure_times
            .iter()
            .copied()
            .filter(|t| *t > after)
            .take(limit)
            .collect()
    }
}
