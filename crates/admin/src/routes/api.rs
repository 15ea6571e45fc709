//! JSON endpoints for scripts running inside the admin pages.

use axum::Json;
use chrono::{DateTime, Utc};
use craftpage_core::{UserId, UserRole};
use serde::Serialize;

use crate::middleware::RequireAdminAuth;

/// The signed-in admin, without tokens.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

/// Session check; 401 when nobody is signed in.
///
/// GET /admin/api/session
pub async fn session(RequireAdminAuth(admin): RequireAdminAuth) -> Json<SessionInfo> {
    Json(SessionInfo {
        id: admin.id,
        email: admin.email,
        display_name: admin.display_name,
        role: admin.role,
        expires_at: admin.expires_at,
    })
}
