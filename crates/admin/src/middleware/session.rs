//! Session middleware configuration for admin.
//!
//! Sessions live server-side (`PostgreSQL` in production, memory in tests);
//! the browser holds a signed cookie with the session ID only.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use sqlx::PgPool;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;
use crate::models::session_keys;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "craftpage_admin_session";

/// Inactivity expiry after signing in with "remember me".
pub const REMEMBER_ME_DAYS: i64 = 30;

/// Create the session layer over any store.
#[must_use]
pub fn create_session_layer<Store: SessionStore>(
    store: Store,
    config: &AdminConfig,
) -> SessionManagerLayer<Store, SignedCookie> {
    let inactivity = time::Duration::try_from(config.session_ttl).unwrap_or(time::Duration::DAY);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(inactivity))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(cookie_key(&config.session_secret))
}

/// The `PostgreSQL` session store in `admin.session`.
///
/// # Errors
///
/// Returns the store's message if the schema or table name is rejected.
pub fn postgres_store(pool: PgPool) -> Result<PostgresStore, String> {
    PostgresStore::new(pool)
        .with_schema_name("admin")?
        .with_table_name("session")
}

/// Cookie signing key derived from the session secret.
///
/// The signer wants 64 bytes of key material; the secret is validated for
/// length and entropy at startup, then stretched with SHA-512.
fn cookie_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

/// Keep this session alive for [`REMEMBER_ME_DAYS`] of inactivity.
pub fn remember_me(session: &Session) {
    session.set_expiry(Some(Expiry::OnInactivity(time::Duration::days(
        REMEMBER_ME_DAYS,
    ))));
}

/// Queue a message for the next page render.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(session: &Session, message: &str) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, message).await
}

/// Take the queued message, if any. A failing store reads as no message.
pub async fn take_flash(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::FLASH)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read flash message");
            None
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_read_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        set_flash(&session, "저장되었습니다!").await.unwrap();

        assert_eq!(take_flash(&session).await.as_deref(), Some("저장되었습니다!"));
        assert_eq!(take_flash(&session).await, None);
    }

    #[test]
    fn test_remember_me_sets_thirty_day_expiry() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        remember_me(&session);
        assert_eq!(
            session.expiry(),
            Some(Expiry::OnInactivity(time::Duration::days(30)))
        );
    }

    #[test]
    fn test_cookie_key_is_deterministic() {
        let a = cookie_key(&SecretString::from("k3Y!9vQz@Lp2#Rt7$Wm4^Xn8&Bc5*Hd1"));
        let b = cookie_key(&SecretString::from("k3Y!9vQz@Lp2#Rt7$Wm4^Xn8&Bc5*Hd1"));
        assert_eq!(a.master(), b.master());
    }
}
