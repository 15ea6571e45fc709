//! Connection settings for the hosted platform.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the platform lives and which keys to present.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL, always ending in `/`.
    pub url: Url,
    /// Public anon key; sent as `apikey` on every request.
    pub anon_key: SecretString,
    /// Service-role key; bypasses row-level security. Only the admin
    /// binary and the CLI carry one.
    pub service_role_key: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Settings with the anon key only and the default timeout.
    #[must_use]
    pub fn new(mut url: Url, anon_key: SecretString) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Self {
            url,
            anon_key,
            service_role_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Attach a service-role key.
    #[must_use]
    pub fn with_service_role_key(mut self, key: Option<SecretString>) -> Self {
        self.service_role_key = key;
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = BackendConfig::new(
            Url::parse("https://project.example.co/base").unwrap(),
            SecretString::from("anon"),
        );
        assert_eq!(config.url.as_str(), "https://project.example.co/base/");
        assert_eq!(
            config.url.join("rest/v1/site_content").unwrap().as_str(),
            "https://project.example.co/base/rest/v1/site_content"
        );
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = BackendConfig::new(
            Url::parse("https://project.example.co").unwrap(),
            SecretString::from("anon-key-value"),
        )
        .with_service_role_key(Some(SecretString::from("service-key-value")));

        let debug = format!("{config:?}");
        assert!(!debug.contains("anon-key-value"));
        assert!(!debug.contains("service-key-value"));
        assert!(debug.contains("[REDACTED]"));
    }
}
