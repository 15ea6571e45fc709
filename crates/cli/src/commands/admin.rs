//! Admin role commands.
//!
//! # Usage
//!
//! ```bash
//! craftpage-cli admin grant <user-id>
//! craftpage-cli admin revoke <user-id>
//! ```
//!
//! Bootstraps the first admin: sign up on `/admin/signup`, then grant the
//! claim here. Later grants can be made from the users page.
//!
//! # Environment Variables
//!
//! - `BACKEND_URL`, `BACKEND_ANON_KEY`, `BACKEND_SERVICE_ROLE_KEY`

use craftpage_core::{UserId, UserRole};
use serde_json::json;

use super::{CommandError, service_client};

/// Grant the admin role.
///
/// # Errors
///
/// Returns an error if the claim cannot be written.
pub async fn grant(user_id: UserId) -> Result<(), CommandError> {
    set_role(user_id, UserRole::Admin).await
}

/// Revoke the admin role. Existing sessions end at their next token
/// refresh.
///
/// # Errors
///
/// Returns an error if the claim cannot be written.
pub async fn revoke(user_id: UserId) -> Result<(), CommandError> {
    set_role(user_id, UserRole::User).await
}

/// Write the claim, then mirror it into `user_profiles`.
async fn set_role(user_id: UserId, role: UserRole) -> Result<(), CommandError> {
    let backend = service_client()?;

    backend.set_role_claim(user_id, role).await?;
    tracing::info!(user_id = %user_id, role = %role, "Role claim updated");

    let changed = backend
        .from("user_profiles")
        .eq("id", user_id)
        .update(&json!({ "role": role.as_str() }))
        .await?;
    if changed == 0 {
        tracing::warn!(user_id = %user_id, "No user_profiles row to update");
    }

    Ok(())
}
