//! Errors returned by [`crate::BackendClient`].

use thiserror::Error;

/// Errors that can occur when talking to the hosted platform.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The table or RPC gateway rejected the request.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The auth service rejected the request.
    #[error("Auth error: {status} - {message}")]
    Auth { status: u16, message: String },

    /// A response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A service-role operation was requested without a service-role key.
    #[error("service role key is not configured")]
    MissingServiceKey,
}

impl BackendError {
    /// The platform's own message for a rejected request, if this error
    /// carries one.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Auth { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status returned by the platform, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the access token was rejected as expired or invalid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Pull a human-readable message out of an error body.
///
/// The auth service uses `msg` or `error_description`, the table gateway
/// uses `message`, and some proxies answer with `error`.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_owned))
        });

    from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            fallback.to_owned()
        } else {
            trimmed.to_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_msg() {
        let body = r#"{"code":400,"msg":"Invalid login credentials","error":"invalid_grant"}"#;
        assert_eq!(error_message(body, "Bad Request"), "Invalid login credentials");
    }

    #[test]
    fn test_error_message_error_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#;
        assert_eq!(error_message(body, "Bad Request"), "Invalid Refresh Token");
    }

    #[test]
    fn test_error_message_table_gateway() {
        let body = r#"{"code":"42501","message":"permission denied for table user_profiles"}"#;
        assert_eq!(
            error_message(body, "Forbidden"),
            "permission denied for table user_profiles"
        );
    }

    #[test]
    fn test_error_message_plain_text_and_empty() {
        assert_eq!(error_message("upstream down\n", "Bad Gateway"), "upstream down");
        assert_eq!(error_message("", "Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_unauthorized_statuses() {
        let err = BackendError::Auth {
            status: 401,
            message: "JWT expired".into(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.provider_message(), Some("JWT expired"));
        assert!(!BackendError::MissingServiceKey.is_unauthorized());
    }
}
