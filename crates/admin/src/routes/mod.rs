//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /admin                          - Dashboard
//! GET  /admin/login                    - Sign-in page
//! POST /admin/login                    - Sign in
//! GET  /admin/signup                   - Sign-up page
//! POST /admin/signup                   - Sign up
//! POST /admin/logout                   - Sign out
//! GET  /admin/content                  - Content editor (?tab=)
//! POST /admin/content                  - Save / add / remove in the editor
//! GET  /admin/inquiries                - Inquiry inbox (?status=)
//! GET  /admin/inquiries/{id}           - Inquiry detail (marks unread as read)
//! POST /admin/inquiries/{id}/status    - Change status
//! POST /admin/inquiries/{id}/note      - Save admin note
//! GET  /admin/users                    - User list
//! POST /admin/users/{id}/role          - Change role
//! GET  /admin/api/session              - JSON session check
//! GET  /health                         - Liveness
//! GET  /health/ready                   - Backend readiness
//! ```

pub mod api;
pub mod auth;
pub mod content;
pub mod dashboard;
pub mod health;
pub mod inquiries;
pub mod users;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the admin page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin") }))
        .route("/admin", get(dashboard::dashboard))
        .merge(auth::router())
        .route("/admin/content", get(content::edit).post(content::submit))
        .route("/admin/inquiries", get(inquiries::index))
        .route("/admin/inquiries/{id}", get(inquiries::show))
        .route("/admin/inquiries/{id}/status", post(inquiries::update_status))
        .route("/admin/inquiries/{id}/note", post(inquiries::save_note))
        .route("/admin/users", get(users::index))
        .route("/admin/users/{id}/role", post(users::update_role))
        .route("/admin/api/session", get(api::session))
}

/// Build the health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}
