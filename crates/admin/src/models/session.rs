//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Duration, Utc};
use craftpage_backend::Session as AuthSession;
use craftpage_core::{UserId, UserRole};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Refresh the access token this long before it actually expires.
const REFRESH_MARGIN_SECONDS: i64 = 60;

/// Session-stored admin identity and platform tokens.
///
/// The tokens never leave the server; the browser only holds the session
/// cookie.
#[derive(Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Platform user ID.
    pub id: UserId,
    /// Sign-in email address.
    pub email: String,
    /// `full_name` from sign-up, or the email when none was given.
    pub display_name: String,
    /// Role claim at sign-in or last refresh.
    pub role: UserRole,
    access_token: String,
    refresh_token: String,
    /// When the access token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Previous sign-in, as reported by the platform.
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl CurrentAdmin {
    /// Build the session identity from a fresh platform session.
    ///
    /// Returns `None` unless the role claim is `admin`.
    #[must_use]
    pub fn from_auth(session: &AuthSession, issued_at: DateTime<Utc>) -> Option<Self> {
        let role = session.user.role().filter(|role| role.is_admin())?;
        let email = session.user.email.clone().unwrap_or_default();
        let display_name = session
            .user
            .full_name()
            .map_or_else(|| email.clone(), str::to_owned);

        Some(Self {
            id: session.user.id,
            email,
            display_name,
            role,
            access_token: session.access_token.expose_secret().to_owned(),
            refresh_token: session.refresh_token.expose_secret().to_owned(),
            expires_at: session.expires_at(issued_at),
            last_sign_in_at: session.user.last_sign_in_at,
        })
    }

    /// Replace tokens and claims after a refresh grant.
    ///
    /// Returns `false` (leaving `self` untouched) when the refreshed claims
    /// no longer grant admin access.
    pub fn apply_refresh(&mut self, session: &AuthSession, issued_at: DateTime<Utc>) -> bool {
        match Self::from_auth(session, issued_at) {
            Some(refreshed) => {
                *self = Self {
                    last_sign_in_at: self.last_sign_in_at,
                    ..refreshed
                };
                true
            }
            None => false,
        }
    }

    /// Whether the access token is expired or about to be.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECONDS) >= self.expires_at
    }

    /// Bearer token for backend calls made as this admin.
    #[must_use]
    pub fn access_token(&self) -> SecretString {
        SecretString::from(self.access_token.clone())
    }

    /// Refresh token for the refresh grant.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl std::fmt::Debug for CurrentAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentAdmin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current signed-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// One-shot message shown on the next page render.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn auth_session(role: Option<&str>, full_name: Option<&str>) -> AuthSession {
        serde_json::from_value(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "user": {
                "id": "00000000-0000-0000-0000-00000000000a",
                "email": "admin@example.com",
                "app_metadata": { "role": role },
                "user_metadata": { "full_name": full_name },
                "last_sign_in_at": "2025-03-01T09:00:00Z"
            }
        }))
        .unwrap()
    }

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_from_auth_requires_admin_claim() {
        assert!(CurrentAdmin::from_auth(&auth_session(None, None), issued()).is_none());
        assert!(CurrentAdmin::from_auth(&auth_session(Some("user"), None), issued()).is_none());

        let admin = CurrentAdmin::from_auth(&auth_session(Some("admin"), None), issued()).unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.display_name, "admin@example.com");
        assert_eq!(admin.expires_at, issued() + Duration::seconds(3600));
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let admin =
            CurrentAdmin::from_auth(&auth_session(Some("admin"), Some("Kim Admin")), issued())
                .unwrap();
        assert_eq!(admin.display_name, "Kim Admin");
    }

    #[test]
    fn test_needs_refresh_within_margin() {
        let admin = CurrentAdmin::from_auth(&auth_session(Some("admin"), None), issued()).unwrap();
        assert!(!admin.needs_refresh(issued()));
        assert!(admin.needs_refresh(issued() + Duration::seconds(3550)));
        assert!(admin.needs_refresh(issued() + Duration::hours(2)));
    }

    #[test]
    fn test_refresh_that_drops_claim_is_refused() {
        let mut admin =
            CurrentAdmin::from_auth(&auth_session(Some("admin"), None), issued()).unwrap();
        let before = admin.expires_at;
        assert!(!admin.apply_refresh(&auth_session(Some("user"), None), issued()));
        assert_eq!(admin.expires_at, before);

        let later = issued() + Duration::hours(1);
        assert!(admin.apply_refresh(&auth_session(Some("admin"), None), later));
        assert_eq!(admin.expires_at, later + Duration::seconds(3600));
    }

    #[test]
    fn test_session_roundtrip_keeps_tokens_and_debug_redacts() {
        let admin = CurrentAdmin::from_auth(&auth_session(Some("admin"), None), issued()).unwrap();
        let stored = serde_json::to_value(&admin).unwrap();
        let restored: CurrentAdmin = serde_json::from_value(stored).unwrap();
        assert_eq!(restored.refresh_token(), "refresh-1");
        assert_eq!(restored.access_token().expose_secret(), "access-1");

        let debug = format!("{admin:?}");
        assert!(!debug.contains("access-1"));
        assert!(debug.contains("[REDACTED]"));
    }
}
