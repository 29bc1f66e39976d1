//! Schedule store error types.

/// Errors that can occur when reading from the schedule store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check SCHEDULE_API_KEY")]
    Unauthorized,

    /// Rate limited by the store
    #[error("rate limited by schedule store")]
    RateLimited,

    /// Store returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock fixture could not be loaded
    #[error("mock data error: {0}")]
    Mock(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized: check SCHEDULE_API_KEY");

        let err = StoreError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = StoreError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));

        let err = StoreError::Mock("no such file".into());
        assert_eq!(err.to_string(), "mock data error: no such file");
    }
}
