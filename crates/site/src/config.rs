//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `CREATORUM_HOST` - Bind address (default: 127.0.0.1)
//! - `CREATORUM_PORT` - Listen port (default: 8080)
//! - `CREATORUM_BASE_URL` - Public URL of this site (default: <http://localhost:8080>)
//! - `CREATORUM_STATIC_DIR` - Directory served under `/static` (default: crates/site/static)
//! - `WAITLIST_API_BASE_URL` - Waitlist backend base URL (default: <http://localhost:3000>)
//! - `WAITLIST_API_TIMEOUT_SECS` - Per-request timeout for backend calls (default: 15)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Backend URL used when `WAITLIST_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Directory with CSS, JS and images
    pub static_dir: PathBuf,
    /// Waitlist backend configuration
    pub api: ApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Waitlist backend API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without trailing slashes
    pub base_url: String,
    /// Timeout applied to every backend request
    pub timeout: Duration,
}

impl SiteConfig {
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
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("CREATORUM_HOST", &or_default("CREATORUM_HOST", "127.0.0.1"))?;
        let port = parse_var("CREATORUM_PORT", &or_default("CREATORUM_PORT", "8080"))?;
        let base_url = or_default("CREATORUM_BASE_URL", "http://localhost:8080");
        let static_dir = PathBuf::from(or_default("CREATORUM_STATIC_DIR", "crates/site/static"));

        let api_base = normalize_base_url(
            "WAITLIST_API_BASE_URL",
            &or_default("WAITLIST_API_BASE_URL", DEFAULT_API_BASE_URL),
        )?;
        let timeout_secs: u64 = parse_var(
            "WAITLIST_API_TIMEOUT_SECS",
            &or_default("WAITLIST_API_TIMEOUT_SECS", "15"),
        )?;

        let sentry_dsn = get("SENTRY_DSN").filter(|s| !s.is_empty());
        let sentry_environment = get("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            api: ApiConfig {
                base_url: api_base,
                timeout: Duration::from_secs(timeout_secs),
            },
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Strip trailing slashes and check the result is an absolute URL.
fn normalize_base_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(trimmed.to_string())
}
