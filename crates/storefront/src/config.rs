//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `SUNBAG_HOST` - Bind address (default: 127.0.0.1)
//! - `SUNBAG_PORT` - Listen port (default: 3000)
//! - `SUNBAG_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://127.0.0.1:3000>)
//! - `SUNBAG_DATA_DIR` - Directory for visitor state and the user registry
//!   (default: data)
//! - `SUNBAG_AUTH_LATENCY_MS` - Simulated register/login latency (default: 800)
//! - `SUNBAG_CHAT_DELAY_MS` - Delay before a chat reply (default: 500)
//! - `SUNBAG_VISITOR_IDLE_SECS` - Idle time before a visitor's live state is
//!   dropped from memory (default: 1800)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::app::Timings;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Root of the file-backed stores
    pub data_dir: PathBuf,
    /// Simulated latencies
    pub timings: Timings,
    /// How long an untouched visitor stays in memory
    pub visitor_idle: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://127.0.0.1:3000".to_owned(),
            data_dir: PathBuf::from("data"),
            timings: Timings::default(),
            visitor_idle: Duration::from_secs(1800),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = Env(&lookup);

        Ok(Self {
            host: env.parse_or("SUNBAG_HOST", defaults.host)?,
            port: env.parse_or("SUNBAG_PORT", defaults.port)?,
            base_url: env.get("SUNBAG_BASE_URL").unwrap_or(defaults.base_url),
            data_dir: env
                .get("SUNBAG_DATA_DIR")
                .map_or(defaults.data_dir, PathBuf::from),
            timings: Timings {
                auth_latency: env.millis_or("SUNBAG_AUTH_LATENCY_MS", defaults.timings.auth_latency)?,
                chat_delay: env.millis_or("SUNBAG_CHAT_DELAY_MS", defaults.timings.chat_delay)?,
            },
            visitor_idle: Duration::from_secs(
                env.parse_or("SUNBAG_VISITOR_IDLE_SECS", defaults.visitor_idle.as_secs())?,
            ),
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get a variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
    }

    fn millis_or(&self, key: &str, default: Duration) -> Result<Duration, ConfigError> {
        let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
        self.parse_or(key, default_ms).map(Duration::from_millis)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.timings.auth_latency, Duration::from_millis(800));
        assert_eq!(config.timings.chat_delay, Duration::from_millis(500));
        assert_eq!(config.visitor_idle, Duration::from_secs(1800));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SUNBAG_HOST", "0.0.0.0"),
            ("SUNBAG_PORT", "8080"),
            ("SUNBAG_BASE_URL", "https://sunbag.be"),
            ("SUNBAG_DATA_DIR", "/var/lib/sunbag"),
            ("SUNBAG_AUTH_LATENCY_MS", "0"),
            ("SUNBAG_CHAT_DELAY_MS", " 20 "),
            ("SENTRY_DSN", "https://key@sentry.io/1"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.secure_cookies());
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/sunbag"));
        assert_eq!(config.timings.auth_latency, Duration::ZERO);
        assert_eq!(config.timings.chat_delay, Duration::from_millis(20));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_empty_values_mean_default() {
        let config = load(&[("SUNBAG_PORT", ""), ("SENTRY_DSN", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("SUNBAG_PORT", "http"),
            ("SUNBAG_PORT", "70000"),
            ("SUNBAG_HOST", "localhost"),
            ("SUNBAG_AUTH_LATENCY_MS", "-1"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == key),
                "{key}={value} should be rejected"
            );
        }
    }
}
