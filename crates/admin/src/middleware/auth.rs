//! Authentication extractors for admin.
//!
//! Every page except sign-in and sign-up takes [`RequireAdminAuth`]. The
//! extractor reads the admin from the server-side session and, when the
//! platform access token is about to expire, exchanges the refresh token
//! first. A refresh that fails, or that comes back without the `admin`
//! claim, ends the session.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{CurrentAdmin, session_keys};
use crate::state::AppState;

/// Sign-in page path.
pub const LOGIN_PATH: &str = "/admin/login";

/// JSON endpoints answer 401 instead of redirecting.
const API_PREFIX: &str = "/admin/api/";

/// Extractor that requires a signed-in admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.display_name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but missing.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// Redirect to the sign-in page, returning to `next` afterwards.
    RedirectToLogin { next: Option<String>, expired: bool },
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl AdminAuthRejection {
    fn for_request(parts: &Parts, expired: bool) -> Self {
        let path = parts.uri.path();
        if path.starts_with(API_PREFIX) {
            return Self::Unauthorized;
        }
        let next = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .filter(|target| target != "/admin");
        Self::RedirectToLogin { next, expired }
    }
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { next, expired } => {
                Redirect::to(&login_location(next.as_deref(), expired)).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Sign-in URL carrying the page to return to and the expiry notice.
#[must_use]
pub fn login_location(next: Option<&str>, expired: bool) -> String {
    let mut params = Vec::new();
    if let Some(next) = next.filter(|next| is_safe_return_path(next)) {
        params.push(format!("next={}", urlencoding::encode(next)));
    }
    if expired {
        params.push("expired=1".to_owned());
    }
    if params.is_empty() {
        LOGIN_PATH.to_owned()
    } else {
        format!("{LOGIN_PATH}?{}", params.join("&"))
    }
}

/// Page that only accepts POST; never a return target.
const LOGOUT_PATH: &str = "/admin/logout";

/// Only same-site admin pages are valid return targets.
#[must_use]
pub fn is_safe_return_path(path: &str) -> bool {
    path.starts_with("/admin")
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.starts_with(LOGOUT_PATH)
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| AdminAuthRejection::for_request(parts, false))?;

        let admin = if admin.needs_refresh(Utc::now()) {
            refresh(state, &session, admin)
                .await
                .ok_or_else(|| AdminAuthRejection::for_request(parts, true))?
        } else {
            admin
        };

        set_sentry_user(admin.id, &admin.email);
        Ok(Self(admin))
    }
}

/// Exchange the refresh token and store the new tokens.
async fn refresh(
    state: &AppState,
    session: &Session,
    mut admin: CurrentAdmin,
) -> Option<CurrentAdmin> {
    let issued_at = Utc::now();
    match state.backend().refresh_session(admin.refresh_token()).await {
        Ok(auth) if admin.apply_refresh(&auth, issued_at) => {
            if let Err(e) = set_current_admin(session, &admin).await {
                tracing::error!(error = %e, "Failed to store refreshed admin session");
            }
            tracing::debug!(admin_id = %admin.id, "Refreshed admin access token");
            Some(admin)
        }
        Ok(_) => {
            tracing::warn!(admin_id = %admin.id, "Admin claim revoked, ending session");
            end_admin_session(session).await;
            None
        }
        Err(e) => {
            tracing::info!(admin_id = %admin.id, error = %e, "Admin session refresh failed");
            end_admin_session(session).await;
            None
        }
    }
}

/// Extractor that optionally gets the current admin.
///
/// Unlike `RequireAdminAuth`, this does not reject the request and does not
/// refresh tokens; the sign-in page uses it to skip the form for an admin
/// who is already signed in.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Delete the session record and clear the cookie.
pub async fn end_admin_session(session: &Session) {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to delete admin session");
    }
    clear_sentry_user();
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(uri: &str) -> Parts {
        let (parts, ()) = Request::builder().uri(uri).body(()).unwrap_or_default().into_parts();
        parts
    }

    #[test]
    fn test_api_paths_get_unauthorized() {
        assert_eq!(
            AdminAuthRejection::for_request(&parts("/admin/api/session"), false),
            AdminAuthRejection::Unauthorized
        );
    }

    #[test]
    fn test_pages_redirect_with_return_path() {
        let rejection =
            AdminAuthRejection::for_request(&parts("/admin/inquiries?status=unread"), true);
        assert_eq!(
            rejection,
            AdminAuthRejection::RedirectToLogin {
                next: Some("/admin/inquiries?status=unread".to_owned()),
                expired: true,
            }
        );
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/admin/login?next=%2Fadmin%2Finquiries%3Fstatus%3Dunread&expired=1"
        );
    }

    #[test]
    fn test_logout_is_never_a_return_path() {
        let response =
            AdminAuthRejection::for_request(&parts("/admin/logout"), false).into_response();
        assert_eq!(response.headers()["location"], "/admin/login");
    }

    #[test]
    fn test_dashboard_redirect_has_no_return_path() {
        assert_eq!(login_location(None, false), "/admin/login");
        assert_eq!(
            AdminAuthRejection::for_request(&parts("/admin"), false),
            AdminAuthRejection::RedirectToLogin {
                next: None,
                expired: false,
            }
        );
    }

    #[test]
    fn test_return_path_must_stay_in_admin() {
        assert!(is_safe_return_path("/admin/users"));
        assert!(!is_safe_return_path("https://evil.example/admin"));
        assert!(!is_safe_return_path("//evil.example/admin"));
        assert!(!is_safe_return_path("/"));
        assert!(!is_safe_return_path("/admin/logout"));
        assert_eq!(login_location(Some("//evil.example"), false), "/admin/login");
    }
}
