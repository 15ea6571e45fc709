//! Integration tests for Craftpage.
//!
//! The site and admin routers run in-process against a `wiremock` server
//! standing in for the hosted platform, so no database or network access
//! is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p craftpage-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `backend_client` - REST and auth requests the client sends
//! - `site` - Landing page and contact form
//! - `admin` - Sign-in, content editor, inquiry inbox, users

use axum::body::{Body, to_bytes};
use axum::http::{Response, header};
use craftpage_backend::BackendConfig;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

/// Anon key the mock platform expects.
pub const ANON_KEY: &str = "anon-key";

/// Service-role key the mock platform expects.
pub const SERVICE_KEY: &str = "service-key";

/// Access token handed out by the mock sign-in.
pub const ACCESS_TOKEN: &str = "access-token-1";

/// User ID of the signed-in account in fixtures.
pub const USER_ID: &str = "00000000-0000-0000-0000-00000000000a";

/// Backend configuration pointing at the mock server.
///
/// # Panics
///
/// Panics if the mock server URI is not a URL.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn backend_config(server: &MockServer, with_service_key: bool) -> BackendConfig {
    BackendConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from(ANON_KEY),
    )
    .with_service_role_key(with_service_key.then(|| SecretString::from(SERVICE_KEY)))
}

/// A sign-in or refresh response carrying `role` in `app_metadata`.
#[must_use]
pub fn session_json(role: Option<&str>) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "refresh_token": "refresh-token-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {
            "id": USER_ID,
            "email": "admin@example.com",
            "app_metadata": { "provider": "email", "role": role },
            "user_metadata": { "full_name": "Kim Admin" },
            "last_sign_in_at": "2025-03-01T00:00:00Z"
        }
    })
}

/// A `contact_inquiries` row.
#[must_use]
pub fn inquiry_json(id: u128, status: &str) -> Value {
    json!({
        "id": uuid::Uuid::from_u128(id),
        "name": "Visitor",
        "email": "visitor@example.com",
        "subject": format!("Question {id}"),
        "message": "Hello there",
        "status": status,
        "admin_note": null,
        "created_at": "2025-03-01T00:30:00Z"
    })
}

/// Read a response body as text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
#[allow(clippy::unwrap_used)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// The `name=value` part of the first `Set-Cookie` header.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookie| cookie.split(';').next())
        .map(str::to_owned)
}
