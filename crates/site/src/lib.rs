//! Craftpage site library.
//!
//! The public landing page and contact form, exposed as a library so the
//! router can be driven in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::{Router, http::Uri, middleware::from_fn};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Directory holding `css/` and `js/`, relative to the crate root.
const STATIC_DIR: &str = "static";

/// Build the full application router.
///
/// `static_root` is the directory that contains `static/`; the binary passes
/// the crate directory, tests may pass anything.
pub fn app(state: AppState, static_root: &Path) -> Router {
    // `new` is deprecated in later 0.6 releases in favour of `with_status_code`.
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(state.config().request_timeout);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::routes(&state))
        .nest_service("/static", ServeDir::new(static_root.join(STATIC_DIR)))
        .fallback(not_found)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(timeout)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}
