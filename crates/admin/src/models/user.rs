//! Records returned by the `get_admin_users` RPC.

use chrono::{DateTime, Utc};
use craftpage_core::locale::format_date;
use craftpage_core::{UserId, UserRole};
use serde::Deserialize;

/// One user as the users page lists them.
///
/// The RPC joins `user_profiles` with the auth users table, so the row
/// carries both the cached role and the platform's sign-in timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Cached role from `user_profiles`; unknown values read as `user`.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Display name, or `—` when the user never set one.
    #[must_use]
    pub fn name_or_dash(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("—")
    }

    /// Sign-up date in ko-KR format.
    #[must_use]
    pub fn created_date(&self) -> String {
        format_date(self.created_at)
    }

    /// Last sign-in date in ko-KR format, or `—` when never.
    #[must_use]
    pub fn last_sign_in_date(&self) -> String {
        self.last_sign_in_at
            .map_or_else(|| "—".to_owned(), format_date)
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<UserRole, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|role| role.parse().ok()).unwrap_or_default())
}
