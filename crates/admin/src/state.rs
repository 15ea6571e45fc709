//! Application state shared across handlers.

use std::sync::Arc;

use craftpage_backend::{BackendClient, BackendError};

use crate::config::AdminConfig;
use crate::models::CurrentAdmin;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the backend client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: BackendClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        if !backend.has_service_role() {
            tracing::warn!("BACKEND_SERVICE_ROLE_KEY not set; role changes only update profiles");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { config, backend }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client (anon key).
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// A backend client acting as the signed-in admin, so row-level
    /// security sees the admin's claims.
    #[must_use]
    pub fn backend_for(&self, admin: &CurrentAdmin) -> BackendClient {
        self.inner.backend.with_access_token(&admin.access_token())
    }
}
