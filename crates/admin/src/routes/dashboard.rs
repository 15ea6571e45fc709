//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use craftpage_backend::{BackendError, Order};
use craftpage_core::{InquiryStatus, inquiry::Inquiry, locale};
use tracing::instrument;

use crate::{
    filters,
    middleware::RequireAdminAuth,
    models::CurrentAdmin,
    routes::inquiries::InquiryListItem,
    state::AppState,
};

/// How many inquiries the dashboard lists.
const RECENT_INQUIRIES: usize = 5;

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub display_name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            display_name: admin.display_name.clone(),
            email: admin.email.clone(),
        }
    }
}

/// Dashboard metrics.
#[derive(Debug, Clone, Default)]
pub struct DashboardMetrics {
    pub users: u64,
    pub inquiries: u64,
    pub unread: u64,
    /// Previous sign-in date, or "—".
    pub last_sign_in: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub metrics: DashboardMetrics,
    pub recent_inquiries: Vec<InquiryListItem>,
}

fn count_or_zero(result: Result<u64, BackendError>, what: &str) -> u64 {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to count {what}");
        0
    })
}

/// Dashboard page handler.
///
/// Counts that fail to load render as zero; the page itself never fails.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> DashboardTemplate {
    let backend = state.backend_for(&admin);

    let users_future = backend.from("user_profiles").count();
    let inquiries_future = backend.from("contact_inquiries").count();
    let unread_future = backend
        .from("contact_inquiries")
        .eq("status", InquiryStatus::Unread.as_str())
        .count();
    let recent_future = backend
        .from("contact_inquiries")
        .select("*")
        .order("created_at", Order::Desc)
        .limit(RECENT_INQUIRIES)
        .fetch::<Inquiry>();

    let (users, inquiries, unread, recent) =
        tokio::join!(users_future, inquiries_future, unread_future, recent_future);

    let recent_inquiries = match recent {
        Ok(rows) => rows.iter().map(InquiryListItem::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch recent inquiries");
            Vec::new()
        }
    };

    let metrics = DashboardMetrics {
        users: count_or_zero(users, "users"),
        inquiries: count_or_zero(inquiries, "inquiries"),
        unread: count_or_zero(unread, "unread inquiries"),
        last_sign_in: admin
            .last_sign_in_at
            .map_or_else(|| "—".to_owned(), locale::format_date),
    };

    DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin".to_string(),
        metrics,
        recent_inquiries,
    }
}
