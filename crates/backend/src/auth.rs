//! Auth service calls: password sign-in, sign-up, refresh, sign-out, and
//! role-claim updates.

use chrono::{DateTime, Utc};
use craftpage_core::{UserId, UserRole};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::client::{BackendClient, Surface, decode_json};
use crate::error::BackendError;

/// Claims the platform manages on behalf of the application; users cannot
/// edit them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// A user as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// The role claim, if it names a known role.
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.app_metadata.role.as_deref()?.parse().ok()
    }

    /// Whether the role claim grants back-office access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(UserRole::is_admin)
    }

    /// `full_name` from user metadata, when set at sign-up.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.user_metadata
            .get("full_name")
            .and_then(serde_json::Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// Tokens issued by a password or refresh grant.
#[derive(Clone, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "secret")]
    pub access_token: SecretString,
    #[serde(deserialize_with = "secret")]
    pub refresh_token: SecretString,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    /// Absolute expiry (unix seconds); derived from `expires_in` when the
    /// service omits it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Absolute access-token expiry.
    #[must_use]
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        self.expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| issued_at + chrono::Duration::seconds(self.expires_in))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

fn secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl BackendClient {
    /// Exchange an email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Auth`] when the credentials are rejected;
    /// the message is the service's own text (e.g. `Invalid login credentials`).
    #[instrument(skip(self, password))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let url = self.endpoint("auth/v1/token?grant_type=password")?;
        let response = self
            .request(Method::POST, url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::check(response, Surface::Auth).await?;
        decode_json(response).await
    }

    /// Exchange a refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Auth`] when the refresh token is no longer valid.
    #[instrument(skip_all)]
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let url = self.endpoint("auth/v1/token?grant_type=refresh_token")?;
        let response = self
            .request(Method::POST, url)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let response = Self::check(response, Surface::Auth).await?;
        decode_json(response).await
    }

    /// Register a new account. The display name is stored as `full_name`
    /// in user metadata.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Auth`] when the service refuses the sign-up.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/signup")?;
        let response = self
            .request(Method::POST, url)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }))
            .send()
            .await?;
        Self::check(response, Surface::Auth).await?;
        Ok(())
    }

    /// Revoke the session of the user this client acts as.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/logout")?;
        let response = self.request(Method::POST, url).send().await?;
        Self::check(response, Surface::Auth).await?;
        Ok(())
    }

    /// Set the `role` claim in a user's app metadata.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingServiceKey`] without a service-role
    /// key, or the service's rejection.
    #[instrument(skip_all, fields(user_id = %user_id, role = %role))]
    pub async fn set_role_claim(&self, user_id: UserId, role: UserRole) -> Result<(), BackendError> {
        let admin = self.service_role()?;
        let url = admin.endpoint(&format!("auth/v1/admin/users/{user_id}"))?;
        let response = admin
            .request(Method::PUT, url)
            .json(&json!({ "app_metadata": { "role": role.as_str() } }))
            .send()
            .await?;
        Self::check(response, Surface::Auth).await?;
        Ok(())
    }

    /// Whether the auth service answers its health check.
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable or unhealthy.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/health")?;
        let response = self.request(Method::GET, url).send().await?;
        Self::check(response, Surface::Auth).await?;
        Ok(())
    }
}
