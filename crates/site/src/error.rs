//! Error responses for the site's few fallible handlers.
//!
//! The landing page and contact form absorb backend failures themselves
//! (fallback copy, inline form error), so only health checks and unknown paths
//! produce an `AppError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use craftpage_backend::BackendError;
use thiserror::Error;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// The hosted backend is not reachable or unhealthy.
    #[error("Backend unavailable: {0}")]
    Unavailable(#[from] BackendError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unavailable(err) => {
                tracing::warn!(error = %err, "Backend unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable")
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
