//! Contact inquiry inbox.
//!
//! The list and the detail panel render on one page. Opening an unread
//! inquiry marks it read; status and note changes post back and redirect
//! to the same detail view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use craftpage_backend::{BackendClient, Order};
use craftpage_core::{
    InquiryFilter, InquiryId, InquiryStatus,
    inquiry::{Inquiry, InquiryBoard},
    locale,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::{
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    routes::dashboard::AdminUserView,
    state::AppState,
};

const TABLE: &str = "contact_inquiries";

// =============================================================================
// Views
// =============================================================================

/// One row of the inquiry list.
#[derive(Debug, Clone)]
pub struct InquiryListItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    /// Status value, used as a CSS modifier.
    pub status: &'static str,
    pub status_label: &'static str,
    pub created_date: String,
    pub unread: bool,
}

impl From<&Inquiry> for InquiryListItem {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id.to_string(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            subject: inquiry.subject.clone(),
            status: inquiry.status.as_str(),
            status_label: inquiry.status.label(),
            created_date: locale::format_date(inquiry.created_at),
            unread: inquiry.status == InquiryStatus::Unread,
        }
    }
}

/// The inquiry open in the detail panel.
#[derive(Debug, Clone)]
pub struct InquiryDetailView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub admin_note: String,
    pub created_at: String,
}

impl From<&Inquiry> for InquiryDetailView {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id.to_string(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            subject: inquiry.subject.clone(),
            message: inquiry.message.clone(),
            status: inquiry.status.as_str(),
            status_label: inquiry.status.label(),
            admin_note: inquiry.admin_note.clone().unwrap_or_default(),
            created_at: locale::format_date_time(inquiry.created_at),
        }
    }
}

/// A filter button or status option.
#[derive(Debug, Clone)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Inquiry inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "inquiries/index.html")]
pub struct InquiriesTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub filter: &'static str,
    pub filters: Vec<Choice>,
    pub inquiries: Vec<InquiryListItem>,
    pub selected_id: String,
    pub selected: Option<InquiryDetailView>,
    pub statuses: Vec<Choice>,
}

impl InquiriesTemplate {
    fn new(admin_user: AdminUserView, board: &InquiryBoard) -> Self {
        let filter = board.filter();
        let selected = board.selected();
        Self {
            admin_user,
            current_path: "/admin/inquiries".to_string(),
            filter: filter.as_str(),
            filters: InquiryFilter::ALL
                .iter()
                .map(|f| Choice {
                    value: f.as_str(),
                    label: f.label(),
                    active: *f == filter,
                })
                .collect(),
            inquiries: board.items().iter().map(InquiryListItem::from).collect(),
            selected_id: selected.map(|i| i.id.to_string()).unwrap_or_default(),
            statuses: InquiryStatus::ALL
                .iter()
                .map(|s| Choice {
                    value: s.as_str(),
                    label: s.label(),
                    active: selected.is_some_and(|i| i.status == *s),
                })
                .collect(),
            selected: selected.map(InquiryDetailView::from),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Inbox query string.
#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    #[serde(default)]
    pub status: Option<String>,
}

impl InboxQuery {
    /// Unknown filter values show everything.
    fn filter(&self) -> InquiryFilter {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Inquiries matching `filter`, newest first.
async fn load_board(backend: &BackendClient, filter: InquiryFilter) -> Result<InquiryBoard> {
    let mut query = backend
        .from(TABLE)
        .select("*")
        .order("created_at", Order::Desc);
    if let Some(status) = filter.status() {
        query = query.eq("status", status.as_str());
    }
    let items: Vec<Inquiry> = query.fetch().await?;
    Ok(InquiryBoard::new(filter, items))
}

/// Inquiry list.
///
/// GET /admin/inquiries?status={filter}
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> Result<InquiriesTemplate> {
    let board = load_board(&state.backend_for(&admin), query.filter()).await?;
    Ok(InquiriesTemplate::new(AdminUserView::from(&admin), &board))
}

/// Inquiry list with one inquiry open. Opening an unread inquiry marks it
/// read.
///
/// GET /admin/inquiries/{id}?status={filter}
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<InquiryId>,
    Query(query): Query<InboxQuery>,
) -> Result<InquiriesTemplate> {
    let backend = state.backend_for(&admin);
    let mut board = load_board(&backend, query.filter()).await?;

    if !board.open(id) {
        let row: Option<Inquiry> = backend
            .from(TABLE)
            .select("*")
            .eq("id", id)
            .fetch_optional()
            .await?;
        let row = row.ok_or_else(|| AppError::NotFound(format!("inquiry {id}")))?;
        board.open_row(row);
    }

    let next = board.selected().and_then(Inquiry::status_on_open);
    if let Some(status) = next {
        match set_status(&backend, id, status).await {
            Ok(()) => board.apply_status(id, status),
            Err(e) => tracing::warn!(inquiry_id = %id, error = %e, "Failed to mark inquiry read"),
        }
    }

    Ok(InquiriesTemplate::new(AdminUserView::from(&admin), &board))
}

async fn set_status(
    backend: &BackendClient,
    id: InquiryId,
    status: InquiryStatus,
) -> std::result::Result<(), craftpage_backend::BackendError> {
    let changed = backend
        .from(TABLE)
        .eq("id", id)
        .update(&json!({ "status": status.as_str() }))
        .await?;
    if changed == 0 {
        tracing::warn!(inquiry_id = %id, "Status update matched no rows");
    }
    Ok(())
}

/// Where to go after a change: the same inquiry under the same filter.
fn detail_location(id: InquiryId, filter: &str) -> String {
    let filter = filter.parse().unwrap_or(InquiryFilter::All);
    format!("/admin/inquiries/{id}?status={filter}")
}

/// Status change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
    #[serde(default)]
    pub filter: String,
}

/// Change an inquiry's status. Any status may move to any other.
///
/// POST /admin/inquiries/{id}/status
#[instrument(skip(admin, state, form))]
pub async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<InquiryId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status: InquiryStatus = form
        .status
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;

    match set_status(&state.backend_for(&admin), id, status).await {
        Ok(()) => tracing::info!(inquiry_id = %id, status = %status, "Inquiry status changed"),
        Err(e) => tracing::warn!(inquiry_id = %id, error = %e, "Failed to change inquiry status"),
    }
    Ok(Redirect::to(&detail_location(id, &form.filter)))
}

/// Admin note form.
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub admin_note: String,
    #[serde(default)]
    pub filter: String,
}

/// Save the admin note. Saving the note leaves the status alone.
///
/// POST /admin/inquiries/{id}/note
#[instrument(skip(admin, state, form))]
pub async fn save_note(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<InquiryId>,
    Form(form): Form<NoteForm>,
) -> Redirect {
    let result = state
        .backend_for(&admin)
        .from(TABLE)
        .eq("id", id)
        .update(&json!({ "admin_note": form.admin_note }))
        .await;
    match result {
        Ok(_) => tracing::info!(inquiry_id = %id, "Inquiry note saved"),
        Err(e) => tracing::warn!(inquiry_id = %id, error = %e, "Failed to save inquiry note"),
    }
    Redirect::to(&detail_location(id, &form.filter))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn inquiry(n: u128, status: InquiryStatus) -> Inquiry {
        Inquiry {
            id: InquiryId::new(Uuid::from_u128(n)),
            name: "Visitor".into(),
            email: "visitor@example.com".into(),
            subject: format!("Question {n}"),
            message: "Hello".into(),
            status,
            admin_note: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 30, 0).unwrap(),
        }
    }

    fn admin_user() -> AdminUserView {
        AdminUserView {
            display_name: "Admin".into(),
            email: "admin@example.com".into(),
        }
    }

    #[test]
    fn test_unknown_filter_shows_everything() {
        let query = InboxQuery {
            status: Some("archived".into()),
        };
        assert_eq!(query.filter(), InquiryFilter::All);
        let query = InboxQuery {
            status: Some("replied".into()),
        };
        assert_eq!(query.filter(), InquiryFilter::Only(InquiryStatus::Replied));
    }

    #[test]
    fn test_detail_location_keeps_filter() {
        let id = InquiryId::new(Uuid::from_u128(7));
        assert_eq!(
            detail_location(id, "unread"),
            format!("/admin/inquiries/{id}?status=unread")
        );
        assert_eq!(
            detail_location(id, ""),
            format!("/admin/inquiries/{id}?status=all")
        );
    }

    #[test]
    fn test_template_marks_selected_status() {
        let mut board = InquiryBoard::new(
            InquiryFilter::All,
            vec![inquiry(1, InquiryStatus::Unread), inquiry(2, InquiryStatus::Replied)],
        );
        assert!(board.open(InquiryId::new(Uuid::from_u128(2))));

        let page = InquiriesTemplate::new(admin_user(), &board);
        assert_eq!(page.inquiries.len(), 2);
        assert!(page.inquiries[0].unread);
        let active: Vec<_> = page.statuses.iter().filter(|s| s.active).map(|s| s.value).collect();
        assert_eq!(active, ["replied"]);
        assert_eq!(page.filters[0].value, "all");
        assert!(page.filters[0].active);
    }

    #[test]
    fn test_list_item_uses_korean_date() {
        let item = InquiryListItem::from(&inquiry(1, InquiryStatus::Read));
        assert_eq!(item.created_date, "2025. 3. 1.");
        assert_eq!(item.status_label, "읽음");
    }
}
