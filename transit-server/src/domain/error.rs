//! Domain error types.
//!
//! These errors mean the schedule data itself cannot be projected. They
//! are distinct from store/IO errors: retrying with the same input is
//! pointless, the data has to be fixed upstream.

/// The schedule (or the caller's request) is unusable for projection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Headway must be a positive number of minutes
    #[error("headway must be positive, got {0} minutes")]
    NonPositiveHeadway(i64),

    /// At least one arrival must be requested
    #[error("limit must be positive")]
    ZeroLimit,
}
