//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_URL` - Hosted platform base URL
//! - `BACKEND_ANON_KEY` - Public anon key
//!
//! ## Optional
//! - `BACKEND_TIMEOUT_SECONDS` - Per-request backend timeout (default: 10)
//! - `SITE_HOST` - Bind address (default: 0.0.0.0)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `SITE_CONTENT_CACHE_SECONDS` - Landing copy cache TTL, 0 disables (default: 60)
//! - `CONTACT_RATE_REPLENISH_SECONDS` - Seconds per replenished contact submit (default: 6)
//! - `CONTACT_RATE_BURST` - Contact submits allowed in a burst (default: 5)
//! - `REQUEST_TIMEOUT_SECONDS` - Server-side request timeout (default: 30)
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use craftpage_backend::BackendConfig;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Quota for the contact form: one submit replenished every
/// `replenish_seconds`, up to `burst` in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuota {
    pub replenish_seconds: u64,
    pub burst: u32,
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Hosted platform connection (anon key only)
    pub backend: BackendConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// How long fetched landing copy is reused; zero disables caching
    pub content_cache_ttl: Duration,
    /// Contact form rate limit
    pub contact_rate: RateQuota,
    /// Server-side request timeout
    pub request_timeout: Duration,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let backend = backend_from_env()?;
        let host = parse_env("SITE_HOST", "0.0.0.0")?;
        let port = parse_env("SITE_PORT", "3000")?;
        let base_url = get_env_or_default("SITE_BASE_URL", "http://localhost:3000");
        let content_cache_ttl = Duration::from_secs(parse_env("SITE_CONTENT_CACHE_SECONDS", "60")?);
        let contact_rate = RateQuota {
            replenish_seconds: parse_positive("CONTACT_RATE_REPLENISH_SECONDS", "6")?,
            burst: parse_positive("CONTACT_RATE_BURST", "5")?,
        };
        let request_timeout = Duration::from_secs(parse_positive("REQUEST_TIMEOUT_SECONDS", "30")?);

        Ok(Self {
            backend,
            host,
            port,
            base_url,
            content_cache_ttl,
            contact_rate,
            request_timeout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Configuration for tests and tools that point the site at a given
    /// backend without touching the environment.
    #[must_use]
    pub fn for_backend(backend: BackendConfig) -> Self {
        Self {
            backend,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            content_cache_ttl: Duration::ZERO,
            contact_rate: RateQuota {
                replenish_seconds: 6,
                burst: 5,
            },
            request_timeout: Duration::from_secs(30),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Platform URL, anon key, and timeout. The site never carries the
/// service-role key.
fn backend_from_env() -> Result<BackendConfig, ConfigError> {
    let url = get_required_env("BACKEND_URL")?;
    let url = Url::parse(&url)
        .map_err(|e| ConfigError::InvalidEnvVar("BACKEND_URL".to_string(), e.to_string()))?;
    let anon_key = SecretString::from(get_required_env("BACKEND_ANON_KEY")?);
    let timeout = Duration::from_secs(parse_positive("BACKEND_TIMEOUT_SECONDS", "10")?);

    Ok(BackendConfig::new(url, anon_key).with_timeout(timeout))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Like [`parse_env`], rejecting zero.
fn parse_positive<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: Display,
{
    let value: T = parse_env(key, default)?;
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default() {
        let port: u16 = parse_env("CRAFTPAGE_SITE_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_invalid_default_reports_key() {
        let err = parse_env::<u16>("CRAFTPAGE_SITE_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CRAFTPAGE_SITE_TEST_UNSET_PORT")
        );
    }

    #[test]
    fn test_parse_positive_rejects_zero() {
        let err = parse_positive::<u32>("CRAFTPAGE_SITE_TEST_UNSET_BURST", "0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        assert_eq!(
            parse_positive::<u32>("CRAFTPAGE_SITE_TEST_UNSET_BURST", "5").unwrap(),
            5
        );
    }

    #[test]
    fn test_missing_required_env() {
        let err = get_required_env("CRAFTPAGE_SITE_TEST_UNSET_URL").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CRAFTPAGE_SITE_TEST_UNSET_URL"
        );
    }

    #[test]
    fn test_for_backend_disables_cache() {
        let backend = BackendConfig::new(
            Url::parse("http://127.0.0.1:54321").unwrap(),
            SecretString::from("anon"),
        );
        let config = SiteConfig::for_backend(backend);
        assert_eq!(config.content_cache_ttl, Duration::ZERO);
        assert_eq!(config.socket_addr().port(), 3000);
    }
}
