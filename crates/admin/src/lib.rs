//! Craftpage admin library.
//!
//! The back-office exposed as a library so the router can be driven
//! in-process by tests.
//!
//! # Security
//!
//! The admin holds the backend's anon key and, optionally, the
//! service-role key used to change role claims. Every page acts on the
//! backend with the signed-in admin's own access token, so row-level
//! security applies to it as to any other user.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use std::path::Path;
use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response, Uri},
    middleware::from_fn,
};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Directory holding `css/` and `js/`, relative to the crate root.
const STATIC_DIR: &str = "static";

/// Build the full application router over a session store.
///
/// `static_root` is the directory that contains `static/`; the binary passes
/// the crate directory, tests may pass anything.
pub fn app<Store>(state: AppState, store: Store, static_root: &Path) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = middleware::create_session_layer(store, state.config());

    // `new` is deprecated in later 0.6 releases in favour of `with_status_code`.
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(state.config().request_timeout);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_root.join(STATIC_DIR)))
        .fallback(not_found)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(session_layer)
        .layer(timeout)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use craftpage_backend::BackendConfig;
    use secrecy::SecretString;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;
    use url::Url;

    use super::*;
    use crate::config::AdminConfig;

    fn test_app() -> Router {
        let backend = BackendConfig::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            SecretString::from("anon-key"),
        );
        let state = AppState::new(AdminConfig::for_backend(backend)).unwrap();
        app(
            state,
            MemoryStore::default(),
            Path::new(env!("CARGO_MANIFEST_DIR")),
        )
    }

    async fn get(uri: &str) -> axum::response::Response {
        test_app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_dashboard() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin");
    }

    #[tokio::test]
    async fn test_serves_static_assets() {
        let response = get("/static/js/admin.js").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = get("/admin/nope/deeper").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
