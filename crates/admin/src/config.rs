//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_URL` - Hosted platform base URL
//! - `BACKEND_ANON_KEY` - Public anon key
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for the session
//!   store (falls back to `DATABASE_URL`)
//! - `ADMIN_SESSION_SECRET` - Session secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `BACKEND_SERVICE_ROLE_KEY` - Service-role key; required to change role claims
//! - `BACKEND_TIMEOUT_SECONDS` - Per-request backend timeout (default: 10)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL (default: <http://localhost:3001>); https
//!   turns on secure cookies
//! - `ADMIN_SESSION_HOURS` - Inactivity expiry (default: 24)
//! - `REQUEST_TIMEOUT_SECONDS` - Server-side request timeout (default: 30)
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use craftpage_backend::BackendConfig;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Shortest accepted `ADMIN_SESSION_SECRET`, in bytes.
const SESSION_SECRET_MIN_LEN: usize = 32;

/// Shannon entropy floor, in bits per character.
const SESSION_SECRET_MIN_ENTROPY: f64 = 3.3;

/// Fragments that mark a copied `.env.example` value (compared lowercase).
const PLACEHOLDER_FRAGMENTS: &[&str] = &[
    "changeme",
    "example",
    "placeholder",
    "replace",
    "secret",
    "password",
    "your-",
    "xxx",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingEnvVar(String),
    #[error("{0} is invalid: {1}")]
    InvalidEnvVar(String, String),
    #[error("{0} is too weak: {1}")]
    WeakSecret(String, SecretWeakness),
}

/// Why a session secret was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SecretWeakness {
    #[error("{len} bytes, need at least {min}", min = SESSION_SECRET_MIN_LEN)]
    TooShort { len: usize },
    #[error("looks like a placeholder (contains \"{0}\")")]
    Placeholder(&'static str),
    #[error("{0:.2} bits of entropy per character, need {min:.1}", min = SESSION_SECRET_MIN_ENTROPY)]
    LowEntropy(f64),
}

/// Everything the admin binary reads from the environment.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub backend: BackendConfig,
    /// Session store database; the URL carries a password.
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Where browsers reach the back-office; `https` means secure cookies.
    pub base_url: String,
    /// Signs the session cookie.
    pub session_secret: SecretString,
    /// Inactivity expiry without "remember me".
    pub session_ttl: Duration,
    pub request_timeout: Duration,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl AdminConfig {
    /// Read the environment, after loading `.env` when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing or malformed variable, or a
    /// session secret that [`assess_session_secret`] refuses.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            return Err(ConfigError::InvalidEnvVar(".env".to_owned(), e.to_string()));
        }

        let backend = backend_from_env()?;
        let database_url = get_database_url("ADMIN_DATABASE_URL")?;
        let host = parse_env("ADMIN_HOST", "127.0.0.1")?;
        let port = parse_env("ADMIN_PORT", "3001")?;
        let base_url = get_env_or_default("ADMIN_BASE_URL", "http://localhost:3001");
        let session_secret = session_secret_from_env("ADMIN_SESSION_SECRET")?;
        let session_hours: u64 = parse_positive("ADMIN_SESSION_HOURS", "24")?;
        let request_timeout = Duration::from_secs(parse_positive("REQUEST_TIMEOUT_SECONDS", "30")?);

        Ok(Self {
            backend,
            database_url,
            host,
            port,
            base_url,
            session_secret,
            session_ttl: Duration::from_secs(session_hours * 3600),
            request_timeout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Configuration for tests and tools that point the admin at a given
    /// backend without touching the environment.
    #[must_use]
    pub fn for_backend(backend: BackendConfig) -> Self {
        Self {
            backend,
            database_url: SecretString::from("postgres://localhost/craftpage_admin"),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://localhost:3001".to_owned(),
            session_secret: SecretString::from("k3Y!9vQz@Lp2#Rt7$Wm4^Xn8&Bc5*Hd1"),
            session_ttl: Duration::from_secs(24 * 3600),
            request_timeout: Duration::from_secs(30),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Platform URL, keys, and timeout.
///
/// The service-role key is optional: without it the users page can only
/// update the profile cache, and the CLI cannot seed content.
///
/// # Errors
///
/// Returns `ConfigError` if the URL or anon key is missing or invalid.
pub fn backend_from_env() -> Result<BackendConfig, ConfigError> {
    let url = get_required_env("BACKEND_URL")?;
    let url = Url::parse(&url)
        .map_err(|e| ConfigError::InvalidEnvVar("BACKEND_URL".to_string(), e.to_string()))?;
    let anon_key = SecretString::from(get_required_env("BACKEND_ANON_KEY")?);
    let service_role_key = get_optional_env("BACKEND_SERVICE_ROLE_KEY").map(SecretString::from);
    let timeout = Duration::from_secs(parse_positive("BACKEND_TIMEOUT_SECONDS", "10")?);

    Ok(BackendConfig::new(url, anon_key)
        .with_service_role_key(service_role_key)
        .with_timeout(timeout))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Unset and blank both count as missing.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` naming `primary_key` when neither
/// variable is set.
pub fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

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

/// Check a session secret for length, copied placeholders, and entropy.
#[must_use]
pub fn assess_session_secret(secret: &str) -> Option<SecretWeakness> {
    if secret.len() < SESSION_SECRET_MIN_LEN {
        return Some(SecretWeakness::TooShort { len: secret.len() });
    }
    let lower = secret.to_lowercase();
    if let Some(fragment) = PLACEHOLDER_FRAGMENTS
        .iter()
        .find(|fragment| lower.contains(**fragment))
    {
        return Some(SecretWeakness::Placeholder(*fragment));
    }
    let entropy = entropy_per_char(secret);
    (entropy < SESSION_SECRET_MIN_ENTROPY).then_some(SecretWeakness::LowEntropy(entropy))
}

fn session_secret_from_env(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    match assess_session_secret(&value) {
        Some(weakness) => Err(ConfigError::WeakSecret(key.to_owned(), weakness)),
        None => Ok(SecretString::from(value)),
    }
}

/// Shannon entropy of the character distribution.
#[allow(clippy::cast_precision_loss)]
fn entropy_per_char(s: &str) -> f64 {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return 0.0;
    }
    chars.sort_unstable();
    let total = chars.len() as f64;
    chars
        .chunk_by(|a, b| a == b)
        .map(|run| {
            let p = run.len() as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG: &str = "k3Y!9vQz@Lp2#Rt7$Wm4^Xn8&Bc5*Hd1";

    #[test]
    fn test_entropy_per_char() {
        assert!(entropy_per_char("").abs() < f64::EPSILON);
        assert!(entropy_per_char("zzzz").abs() < f64::EPSILON);
        assert!((entropy_per_char("abab") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_secret_is_refused_first() {
        assert_eq!(
            assess_session_secret("changeme"),
            Some(SecretWeakness::TooShort { len: 8 })
        );
    }

    #[test]
    fn test_placeholder_secret_is_refused() {
        assert_eq!(
            assess_session_secret("Your-Admin-Session-Key-Goes-Here!"),
            Some(SecretWeakness::Placeholder("your-"))
        );
    }

    #[test]
    fn test_repetitive_secret_is_refused() {
        assert!(matches!(
            assess_session_secret(&"a1".repeat(20)),
            Some(SecretWeakness::LowEntropy(_))
        ));
    }

    #[test]
    fn test_random_secret_is_accepted() {
        assert_eq!(assess_session_secret(STRONG), None);
    }

    #[test]
    fn test_test_config_is_plain_http() {
        let backend = BackendConfig::new(
            Url::parse("http://127.0.0.1:54321").unwrap(),
            SecretString::from("anon"),
        );
        let config = AdminConfig::for_backend(backend);
        assert_eq!(assess_session_secret(config.session_secret.expose_secret()), None);
        assert_eq!(config.socket_addr().port(), 3001);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_weak_secret_error_names_variable() {
        let err = ConfigError::WeakSecret(
            "ADMIN_SESSION_SECRET".to_owned(),
            SecretWeakness::TooShort { len: 5 },
        );
        assert_eq!(
            err.to_string(),
            "ADMIN_SESSION_SECRET is too weak: 5 bytes, need at least 32"
        );
    }

    #[test]
    fn test_database_url_reports_primary_key() {
        let err = get_database_url("CRAFTPAGE_ADMIN_TEST_UNSET_DB");
        // DATABASE_URL may be set on a developer machine
        if std::env::var("DATABASE_URL").is_err() {
            assert!(
                matches!(err, Err(ConfigError::MissingEnvVar(ref key)) if key == "CRAFTPAGE_ADMIN_TEST_UNSET_DB")
            );
        }
    }
}
