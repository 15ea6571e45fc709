//! Landing page route handler.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::content::LandingContent;
use crate::filters;
use crate::routes::contact::ContactForm;
use crate::state::AppState;

/// Landing page query string.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// `1` after a successful contact submit.
    #[serde(default)]
    pub sent: Option<String>,
    /// `yearly` to show yearly prices without script.
    #[serde(default)]
    pub billing: Option<String>,
}

/// The landing page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub content: Arc<LandingContent>,
    pub yearly: bool,
    /// Show the contact success panel instead of the form.
    pub sent: bool,
    pub contact: ContactForm,
    pub contact_error: Option<String>,
}

impl IndexTemplate {
    /// A landing page with an empty contact form.
    #[must_use]
    pub fn new(content: Arc<LandingContent>) -> Self {
        Self {
            content,
            yearly: false,
            sent: false,
            contact: ContactForm::default(),
            contact_error: None,
        }
    }
}

/// Display the landing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> IndexTemplate {
    let content = state.landing_content().await;

    IndexTemplate {
        yearly: query.billing.as_deref() == Some("yearly"),
        sent: query.sent.as_deref() == Some("1"),
        ..IndexTemplate::new(content)
    }
}
