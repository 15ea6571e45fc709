//! User list and role management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use craftpage_core::{UserId, UserRole};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::{
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    models::UserRecord,
    routes::dashboard::AdminUserView,
    state::AppState,
};

/// One row of the users table.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: &'static str,
    pub is_admin: bool,
    pub created_date: String,
    pub last_sign_in: String,
    /// The signed-in admin's own row.
    pub is_self: bool,
}

impl UserRow {
    fn new(user: &UserRecord, me: UserId) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone().unwrap_or_else(|| "—".to_owned()),
            display_name: user.name_or_dash().to_owned(),
            role: user.role.as_str(),
            is_admin: user.role.is_admin(),
            created_date: user.created_date(),
            last_sign_in: user.last_sign_in_date(),
            is_self: user.id == me,
        }
    }
}

/// Users page template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub users: Vec<UserRow>,
    /// Without a service-role key only the cached role changes.
    pub claims_writable: bool,
}

/// List every user.
///
/// GET /admin/users
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<UsersTemplate> {
    let users: Vec<UserRecord> = state
        .backend_for(&admin)
        .rpc("get_admin_users", &json!({}))
        .await?;

    Ok(UsersTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/users".to_string(),
        users: users.iter().map(|u| UserRow::new(u, admin.id)).collect(),
        claims_writable: state.backend().has_service_role(),
    })
}

/// Role change form.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Change a user's role.
///
/// The `app_metadata.role` claim is what grants access, so it is written
/// first; the `user_profiles` copy only follows once the claim is set.
/// Without a service-role key only the cached copy changes.
///
/// POST /admin/users/{id}/role
#[instrument(skip(admin, state, form), fields(role = %form.role))]
pub async fn update_role(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect> {
    if user_id == admin.id {
        return Err(AppError::BadRequest(
            "admins cannot change their own role".to_string(),
        ));
    }
    let role: UserRole = form
        .role
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;

    if state.backend().has_service_role() {
        if let Err(e) = state.backend().set_role_claim(user_id, role).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to set role claim");
            return Ok(Redirect::to("/admin/users"));
        }
    } else {
        tracing::warn!(
            user_id = %user_id,
            "No service role key; access is unchanged until the claim is set"
        );
    }

    let result = state
        .backend_for(&admin)
        .from("user_profiles")
        .eq("id", user_id)
        .update(&json!({ "role": role.as_str() }))
        .await;
    match result {
        Ok(_) => tracing::info!(user_id = %user_id, role = %role, admin_id = %admin.id, "Role changed"),
        Err(e) => tracing::warn!(user_id = %user_id, error = %e, "Failed to update cached role"),
    }
    Ok(Redirect::to("/admin/users"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_row_marks_self_and_fills_dashes() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "email": null,
            "display_name": "  ",
            "role": "admin",
            "created_at": "2025-03-01T00:00:00Z"
        }))
        .unwrap();

        let row = UserRow::new(&user, user.id);
        assert!(row.is_self);
        assert!(row.is_admin);
        assert_eq!(row.email, "—");
        assert_eq!(row.display_name, "—");
        assert_eq!(row.last_sign_in, "—");
    }
}
