//! Session store migration.
//!
//! # Usage
//!
//! ```bash
//! craftpage-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Creates the `admin` schema and the `admin.session` table used by the
//! admin's session store. Safe to run repeatedly.

use craftpage_admin::config::{ConfigError, get_database_url};
use craftpage_admin::{db, middleware::postgres_store};
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The session store rejected its schema or table name.
    #[error("Session store error: {0}")]
    Store(String),
}

/// Run the session store migration.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("ADMIN_DATABASE_URL")?;

    tracing::info!("Connecting to admin database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating admin session table...");
    let store = postgres_store(pool).map_err(MigrationError::Store)?;
    store.migrate().await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
