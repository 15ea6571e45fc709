//! Landing-page content editor.
//!
//! One tab per slot. Each save upserts the slot's whole document on
//! `(section, content_key)`. Adding or removing a testimonial only
//! re-renders the submitted form; nothing is written until "save".

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use craftpage_core::content::{
    ContentRow, ContentSet, ContentSlot, EditorAction, FeatureItem, HeroContent, PricingPlan,
    SlotContent, TestimonialItem,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    error::{AppError, Result},
    filters,
    middleware::{RequireAdminAuth, set_flash, take_flash},
    routes::dashboard::AdminUserView,
    state::AppState,
};

/// Flash after a successful save.
pub const SAVED_MESSAGE: &str = "저장되었습니다!";

/// Error banner when a save is refused or fails.
pub const SAVE_FAILED_MESSAGE: &str = "저장에 실패했습니다.";

/// Upsert conflict target for `site_content`.
const CONTENT_CONFLICT: &str = "section,content_key";

/// A tab in the editor's tab bar.
#[derive(Debug, Clone)]
pub struct TabLink {
    pub section: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// The document being edited, split out per slot for the template.
#[derive(Debug, Clone, Default)]
pub struct EditorView {
    pub section: &'static str,
    pub hero: Option<HeroContent>,
    pub features: Vec<FeatureItem>,
    pub testimonials: Vec<TestimonialItem>,
    pub pricing: Vec<PricingPlan>,
}

impl From<&SlotContent> for EditorView {
    fn from(content: &SlotContent) -> Self {
        let section = content.slot().section();
        match content {
            SlotContent::Hero(hero) => Self {
                section,
                hero: Some(hero.clone()),
                ..Self::default()
            },
            SlotContent::Features(items) => Self {
                section,
                features: items.clone(),
                ..Self::default()
            },
            SlotContent::Testimonials(items) => Self {
                section,
                testimonials: items.clone(),
                ..Self::default()
            },
            SlotContent::Pricing(items) => Self {
                section,
                pricing: items.clone(),
                ..Self::default()
            },
        }
    }
}

/// Content editor template.
#[derive(Template, WebTemplate)]
#[template(path = "content/index.html")]
pub struct ContentTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub tabs: Vec<TabLink>,
    pub editor: EditorView,
    pub flash: Option<String>,
    pub error: Option<String>,
}

impl ContentTemplate {
    fn new(admin_user: AdminUserView, content: &SlotContent) -> Self {
        let active = content.slot();
        Self {
            admin_user,
            current_path: "/admin/content".to_string(),
            tabs: ContentSlot::ALL
                .iter()
                .map(|slot| TabLink {
                    section: slot.section(),
                    label: slot.label(),
                    active: *slot == active,
                })
                .collect(),
            editor: EditorView::from(content),
            flash: None,
            error: None,
        }
    }
}

/// Editor query string.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(default)]
    pub tab: Option<String>,
}

/// The selected tab; unknown or missing tabs open the hero editor.
fn selected_slot(tab: Option<&str>) -> ContentSlot {
    tab.and_then(ContentSlot::from_section)
        .unwrap_or(ContentSlot::Hero)
}

/// Show the editor for one slot.
///
/// GET /admin/content?tab={section}
#[instrument(skip(admin, state, session))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ContentQuery>,
) -> Result<ContentTemplate> {
    let slot = selected_slot(query.tab.as_deref());
    let rows: Vec<ContentRow> = state
        .backend_for(&admin)
        .from("site_content")
        .select("section,content_key,content_value")
        .eq("section", slot.section())
        .fetch()
        .await?;
    let content = rows.into_iter().collect::<ContentSet>().editor(slot);

    let mut page = ContentTemplate::new(AdminUserView::from(&admin), &content);
    page.flash = take_flash(&session).await;
    Ok(page)
}

/// Handle an editor submission.
///
/// POST /admin/content
///
/// The form carries `tab`, `action` (`save`, `add`, or `remove:{index}`),
/// and the document fields.
#[instrument(skip(admin, state, session, form))]
pub async fn submit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let field = |name: &str| {
        form.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };
    let slot = field("tab")
        .and_then(ContentSlot::from_section)
        .ok_or_else(|| AppError::BadRequest("unknown content tab".to_string()))?;
    let action: EditorAction = field("action")
        .unwrap_or("save")
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;
    let mut content =
        SlotContent::from_form(slot, &form).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let admin_user = AdminUserView::from(&admin);
    match action {
        EditorAction::AddItem => {
            content.add_testimonial();
            return Ok(ContentTemplate::new(admin_user, &content).into_response());
        }
        EditorAction::RemoveItem(index) => {
            content.remove_testimonial(index);
            return Ok(ContentTemplate::new(admin_user, &content).into_response());
        }
        EditorAction::Save => {}
    }

    let failed = |content: &SlotContent, status: StatusCode| {
        let mut page = ContentTemplate::new(admin_user.clone(), content);
        page.error = Some(SAVE_FAILED_MESSAGE.to_owned());
        (status, page).into_response()
    };

    if let Err(e) = content.validate() {
        tracing::warn!(slot = %slot, error = %e, "Refused invalid content document");
        return Ok(failed(&content, StatusCode::UNPROCESSABLE_ENTITY));
    }

    let row = ContentRow::from_content(&content);
    if let Err(e) = state
        .backend_for(&admin)
        .from("site_content")
        .upsert(&row, CONTENT_CONFLICT)
        .await
    {
        tracing::error!(slot = %slot, error = %e, "Failed to save content");
        return Ok(failed(&content, StatusCode::BAD_GATEWAY));
    }

    tracing::info!(slot = %slot, admin_id = %admin.id, "Content saved");
    set_flash(&session, SAVED_MESSAGE).await?;
    Ok(Redirect::to(&format!("/admin/content?tab={}", slot.section())).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_slot_defaults_to_hero() {
        assert_eq!(selected_slot(None), ContentSlot::Hero);
        assert_eq!(selected_slot(Some("nope")), ContentSlot::Hero);
        assert_eq!(selected_slot(Some("pricing")), ContentSlot::Pricing);
    }

    #[test]
    fn test_editor_view_splits_by_slot() {
        let view = EditorView::from(&SlotContent::seed(ContentSlot::Features));
        assert_eq!(view.section, "features");
        assert_eq!(view.features.len(), 6);
        assert!(view.hero.is_none());
        assert!(view.pricing.is_empty());
    }

    #[test]
    fn test_tabs_mark_active_slot() {
        let admin_user = AdminUserView {
            display_name: "Admin".into(),
            email: "admin@example.com".into(),
        };
        let page = ContentTemplate::new(admin_user, &SlotContent::seed(ContentSlot::Pricing));
        let active: Vec<_> = page
            .tabs
            .iter()
            .filter(|tab| tab.active)
            .map(|tab| tab.section)
            .collect();
        assert_eq!(active, ["pricing"]);
        assert_eq!(page.tabs.len(), 4);
    }

    #[test]
    #[allow(clippy::unwrap_used, clippy::indexing_slicing)]
    fn test_enter_key_saves_testimonials() {
        let admin_user = AdminUserView {
            display_name: "Admin".into(),
            email: "admin@example.com".into(),
        };
        let content = SlotContent::Testimonials(vec![TestimonialItem::default(); 2]);
        let html = ContentTemplate::new(admin_user, &content).render().unwrap();

        let first_action = html.find(r#"name="action""#).unwrap();
        assert!(html[first_action..].starts_with(r#"name="action" value="save""#));
        assert!(html.contains(r#"value="remove:1""#));
    }
}
