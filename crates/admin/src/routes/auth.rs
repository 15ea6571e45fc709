//! Authentication route handlers for admin.
//!
//! Email and password sign-in against the hosted auth service. Only
//! accounts whose `app_metadata.role` claim is `admin` get a session;
//! anyone else is signed straight back out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Utc;
use craftpage_backend::BackendError;
use craftpage_core::{
    Email,
    auth::{messages, sign_in_error_message, sign_up_error_message, validate_sign_up},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, set_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAdminAuth,
    auth::{LOGIN_PATH, is_safe_return_path},
    end_admin_session, remember_me, set_current_admin,
};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Sign-in page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub email: String,
    pub remember: bool,
    /// Page to return to after signing in.
    pub next: String,
}

/// Sign-up page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
    pub email: String,
    pub full_name: String,
    pub agreed: bool,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/signup", get(signup_page).post(signup))
        .route("/admin/logout", axum::routing::post(logout))
}

/// Sign-in page query string.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub signed_up: Option<String>,
    #[serde(default)]
    pub expired: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Render the sign-in page, or skip it for an admin who is signed in.
///
/// GET /admin/login
pub async fn login_page(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }

    let notice = if query.signed_up.is_some() {
        Some(messages::SIGNED_UP.to_owned())
    } else if query.expired.is_some() {
        Some(messages::SESSION_EXPIRED.to_owned())
    } else {
        None
    };

    LoginTemplate {
        notice,
        next: query
            .next
            .filter(|next| is_safe_return_path(next))
            .unwrap_or_default(),
        ..LoginTemplate::default()
    }
    .into_response()
}

/// Sign-in form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Checkbox; present when ticked.
    #[serde(default)]
    pub remember: Option<String>,
    #[serde(default)]
    pub next: String,
}

/// Sign in.
///
/// POST /admin/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let remember = form.remember.is_some();
    let page = |error: String| LoginTemplate {
        error: Some(error),
        email: form.email.clone(),
        remember,
        next: form.next.clone(),
        ..LoginTemplate::default()
    };

    let issued_at = Utc::now();
    let auth = match state
        .backend()
        .sign_in_with_password(form.email.trim(), &form.password)
        .await
    {
        Ok(auth) => auth,
        Err(e) => {
            tracing::info!(error = %e, "Admin sign-in rejected");
            return Ok(page(sign_in_failure(&e)).into_response());
        }
    };

    let Some(admin) = CurrentAdmin::from_auth(&auth, issued_at) else {
        tracing::warn!(user_id = %auth.user.id, "Sign-in without admin claim");
        if let Err(e) = state
            .backend()
            .with_access_token(&auth.access_token)
            .sign_out()
            .await
        {
            tracing::warn!(error = %e, "Failed to revoke non-admin session");
        }
        return Ok(page(messages::NOT_ADMIN.to_owned()).into_response());
    };

    session.cycle_id().await?;
    set_current_admin(&session, &admin).await?;
    if remember {
        remember_me(&session);
    }
    set_sentry_user(admin.id, &admin.email);
    tracing::info!(admin_id = %admin.id, "Admin signed in");

    let target = Some(form.next.as_str())
        .filter(|next| is_safe_return_path(next))
        .unwrap_or("/admin");
    Ok(Redirect::to(target).into_response())
}

/// Korean message for a failed sign-in.
fn sign_in_failure(error: &BackendError) -> String {
    error
        .provider_message()
        .map_or_else(|| messages::SIGN_IN_FAILED.to_owned(), sign_in_error_message)
}

/// Render the sign-up page.
///
/// GET /admin/signup
pub async fn signup_page() -> SignupTemplate {
    SignupTemplate::default()
}

/// Sign-up form.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub full_name: String,
    /// Terms checkbox; present when ticked.
    #[serde(default)]
    pub agree: Option<String>,
}

/// Create an account. New accounts carry no admin claim; an existing
/// admin grants it from the users page.
///
/// POST /admin/signup
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    let agreed = form.agree.is_some();
    let page = |error: String| SignupTemplate {
        error: Some(error),
        email: form.email.clone(),
        full_name: form.full_name.clone(),
        agreed,
    };

    if let Err(e) = validate_sign_up(&form.password, &form.confirm_password, agreed) {
        return page(e.to_string()).into_response();
    }
    let Ok(email) = Email::parse(&form.email) else {
        return page(messages::INVALID_EMAIL.to_owned()).into_response();
    };

    match state
        .backend()
        .sign_up(email.as_str(), &form.password, form.full_name.trim())
        .await
    {
        Ok(()) => {
            tracing::info!("Account created");
            Redirect::to("/admin/login?signed_up=1").into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "Sign-up rejected");
            let message = e
                .provider_message()
                .map_or_else(|| messages::SIGN_UP_FAILED.to_owned(), sign_up_error_message);
            page(message).into_response()
        }
    }
}

/// Sign out: revoke the platform session when there is one, then drop ours.
///
/// Works without a live session so an expired admin still lands on the
/// sign-in page.
///
/// POST /admin/logout
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    OptionalAdminAuth(admin): OptionalAdminAuth,
    session: Session,
) -> Redirect {
    if let Some(admin) = admin {
        if let Err(e) = state.backend_for(&admin).sign_out().await {
            tracing::warn!(error = %e, "Failed to revoke platform session");
        }
        tracing::info!(admin_id = %admin.id, "Admin signed out");
    }
    end_admin_session(&session).await;
    Redirect::to(LOGIN_PATH)
}
