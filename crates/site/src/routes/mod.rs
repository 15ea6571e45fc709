//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Landing page (?sent=1, ?billing=yearly)
//! POST /contact        - Contact form submit (rate limited)
//! GET  /health         - Liveness
//! GET  /health/ready   - Backend readiness
//! ```

pub mod contact;
pub mod health;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::contact_rate_limiter;
use crate::state::AppState;

/// Build the page and form routes.
pub fn routes(state: &AppState) -> Router<AppState> {
    let submit = post(contact::submit);
    let submit = match contact_rate_limiter(state.config().contact_rate) {
        Some(limiter) => submit.layer(limiter),
        None => {
            tracing::warn!("Contact rate limit disabled by configuration");
            submit
        }
    };

    Router::new()
        .route("/", get(home::index))
        .route("/contact", submit)
}

/// Build the health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}
