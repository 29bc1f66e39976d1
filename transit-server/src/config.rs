//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use crate::cache::CacheConfig;

/// Default listen address.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Kadirli is on Turkey time, UTC+3 all year.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 180;

/// Error in the server's environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("set SCHEDULE_API_URL for a real store or TRANSIT_MOCK_DATA for a fixture")]
    NoBackend,
}

/// Where the server reads schedules from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// The store's REST interface.
    Http {
        base_url: String,
        api_key: String,
        /// Request timeout override, in seconds
        timeout_secs: Option<u64>,
        /// Concurrent request cap override
        max_concurrent: Option<usize>,
    },
    /// A JSON fixture file.
    Mock { path: PathBuf },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub backend: StoreBackend,
    /// Zone schedules are published in.
    pub timezone: FixedOffset,
    pub static_dir: String,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// - `TRANSIT_BIND`: listen address (default `127.0.0.1:3000`)
    /// - `TRANSIT_MOCK_DATA`: fixture path; takes precedence over the API
    /// - `SCHEDULE_API_URL` / `SCHEDULE_API_KEY`: the store's REST interface
    /// - `SCHEDULE_API_TIMEOUT_SECS` / `SCHEDULE_API_MAX_CONCURRENT`: client limits
    /// - `TRANSIT_UTC_OFFSET_MINUTES`: schedule time zone (default 180)
    /// - `TRANSIT_STATIC_DIR`: static assets (default `static`)
    /// - `TRANSIT_CACHE_TTL_SECS`: store cache TTL (default 300)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_str = lookup("TRANSIT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_str.parse().map_err(|_| ConfigError::Invalid {
            name: "TRANSIT_BIND",
            value: bind_str.clone(),
        })?;

        let backend = match (lookup("TRANSIT_MOCK_DATA"), lookup("SCHEDULE_API_URL")) {
            (Some(path), _) => StoreBackend::Mock { path: path.into() },
            (None, Some(base_url)) => StoreBackend::Http {
                base_url,
                api_key: lookup("SCHEDULE_API_KEY").unwrap_or_default(),
                timeout_secs: parse_optional(&lookup, "SCHEDULE_API_TIMEOUT_SECS")?,
                max_concurrent: parse_optional(&lookup, "SCHEDULE_API_MAX_CONCURRENT")?,
            },
            (None, None) => return Err(ConfigError::NoBackend),
        };

        let offset_minutes = match lookup("TRANSIT_UTC_OFFSET_MINUTES") {
            Some(value) => value.parse::<i32>().map_err(|_| ConfigError::Invalid {
                name: "TRANSIT_UTC_OFFSET_MINUTES",
                value,
            })?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let timezone = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                name: "TRANSIT_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        let mut cache = CacheConfig::default();
        if let Some(secs) = parse_optional::<u64>(&lookup, "TRANSIT_CACHE_TTL_SECS")? {
            cache.ttl = Duration::from_secs(secs);
        }

        Ok(Self {
            bind,
            backend,
            timezone,
            static_dir: lookup("TRANSIT_STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            cache,
        })
    }
}

/// Parse `name` if it is set.
fn parse_optional<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}
