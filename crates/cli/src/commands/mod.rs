//! CLI subcommands.

pub mod admin;
pub mod content;
pub mod migrate;

use craftpage_backend::{BackendClient, BackendError};
use thiserror::Error;

/// Errors shared by the backend-facing commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] craftpage_admin::config::ConfigError),

    /// The hosted backend rejected or failed a request.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// A client holding the service-role key.
///
/// # Errors
///
/// Returns an error if the backend configuration is missing, or if
/// `BACKEND_SERVICE_ROLE_KEY` is not set.
pub fn service_client() -> Result<BackendClient, CommandError> {
    dotenvy::dotenv().ok();
    let config = craftpage_admin::config::backend_from_env()?;
    Ok(BackendClient::new(&config)?.service_role()?)
}
