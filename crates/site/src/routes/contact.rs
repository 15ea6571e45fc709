//! Contact form route handler.
//!
//! A submit inserts one `contact_inquiries` row with status `unread`. On
//! success the browser is redirected to the landing page's success panel;
//! on failure the page is rendered again with the visitor's input kept.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use craftpage_core::auth::messages;
use craftpage_core::inquiry::{ContactError, NewInquiry};
use serde::Deserialize;
use tracing::instrument;

use crate::routes::home::IndexTemplate;
use crate::state::AppState;

/// Shown when the inquiry could not be stored.
pub const SUBMIT_FAILED: &str = "문의 전송에 실패했습니다. 다시 시도해주세요.";

/// Shown when a required field is blank.
pub const FIELDS_REQUIRED: &str = "모든 항목을 입력해주세요.";

/// Where a successful submit lands.
pub const SENT_LOCATION: &str = "/?sent=1#contact";

/// Contact form data; also the values echoed back after a failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Submit the contact form.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    let inquiry = match NewInquiry::from_form(&form.name, &form.email, &form.subject, &form.message)
    {
        Ok(inquiry) => inquiry,
        Err(e) => {
            tracing::info!(error = %e, "Rejected contact form");
            let message = match e {
                ContactError::InvalidEmail(_) => messages::INVALID_EMAIL,
                ContactError::MissingField(_) => FIELDS_REQUIRED,
                ContactError::TooLong { .. } => SUBMIT_FAILED,
            };
            return rerender(&state, form, message, StatusCode::UNPROCESSABLE_ENTITY).await;
        }
    };

    match state.backend().from("contact_inquiries").insert(&inquiry).await {
        Ok(()) => {
            tracing::info!(subject = %inquiry.subject, "Contact inquiry received");
            Redirect::to(SENT_LOCATION).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store contact inquiry");
            rerender(&state, form, SUBMIT_FAILED, StatusCode::BAD_GATEWAY).await
        }
    }
}

async fn rerender(
    state: &AppState,
    form: ContactForm,
    message: &str,
    status: StatusCode,
) -> Response {
    let page = IndexTemplate {
        contact: form,
        contact_error: Some(message.to_owned()),
        ..IndexTemplate::new(state.landing_content().await)
    };
    (status, page).into_response()
}
