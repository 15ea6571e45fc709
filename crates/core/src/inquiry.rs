//! Contact inquiries and the admin status workflow.
//!
//! Visitors create inquiries from the landing page's contact form; they
//! start out `unread`. Admins move them between states freely, and opening
//! an unread inquiry marks it read as a side effect of viewing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError, InquiryFilter, InquiryId, InquiryStatus};

/// Longest subject accepted from the contact form.
pub const MAX_SUBJECT_LEN: usize = 200;

/// Longest message accepted from the contact form.
pub const MAX_MESSAGE_LEN: usize = 5000;

/// A row of `contact_inquiries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub subject: String,
    #[serde(default)]
    pub message: String,
    pub status: InquiryStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    /// The transition to issue when an admin opens this inquiry.
    ///
    /// Only unread inquiries move (to read); anything else stays put, so
    /// re-opening never issues a second update.
    #[must_use]
    pub fn status_on_open(&self) -> Option<InquiryStatus> {
        (self.status == InquiryStatus::Unread).then_some(InquiryStatus::Read)
    }
}

/// Errors from validating a contact form submission.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Insert payload for a new inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewInquiry {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub status: InquiryStatus,
}

impl NewInquiry {
    /// Validate raw form input into an unread inquiry.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError`] for blank fields, overlong subject or
    /// message, or a malformed email address.
    pub fn from_form(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, ContactError> {
        let name = required("name", name)?;
        let email = Email::parse(email)?;
        let subject = required("subject", subject)?;
        let message = required("message", message)?;

        if subject.chars().count() > MAX_SUBJECT_LEN {
            return Err(ContactError::TooLong {
                field: "subject",
                max: MAX_SUBJECT_LEN,
            });
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ContactError::TooLong {
                field: "message",
                max: MAX_MESSAGE_LEN,
            });
        }

        Ok(Self {
            name,
            email,
            subject,
            message,
            status: InquiryStatus::Unread,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ContactError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// The inbox as one admin sees it: the filtered list plus the inquiry open
/// in the detail panel.
///
/// Status and note changes are applied to both in place, so the page can
/// render the result of an update without fetching the list again.
#[derive(Debug, Clone, Default)]
pub struct InquiryBoard {
    filter: InquiryFilter,
    items: Vec<Inquiry>,
    selected: Option<Inquiry>,
}

impl InquiryBoard {
    /// Board over an already-filtered, date-descending list.
    #[must_use]
    pub const fn new(filter: InquiryFilter, items: Vec<Inquiry>) -> Self {
        Self {
            filter,
            items,
            selected: None,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> InquiryFilter {
        self.filter
    }

    #[must_use]
    pub fn items(&self) -> &[Inquiry] {
        &self.items
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Inquiry> {
        self.selected.as_ref()
    }

    /// Open `id` in the detail panel, using the list entry when present.
    ///
    /// Returns `false` when the inquiry is not on the board; pass the row
    /// fetched separately to [`InquiryBoard::open_row`] in that case.
    pub fn open(&mut self, id: InquiryId) -> bool {
        self.selected = self.items.iter().find(|i| i.id == id).cloned();
        self.selected.is_some()
    }

    /// Open an inquiry that is not part of the current list (for example a
    /// replied inquiry linked from the dashboard while filtering unread).
    pub fn open_row(&mut self, inquiry: Inquiry) {
        self.selected = Some(inquiry);
    }

    /// Reflect a status change in the list and the open detail view.
    pub fn apply_status(&mut self, id: InquiryId, status: InquiryStatus) {
        for inquiry in self.items.iter_mut().filter(|i| i.id == id) {
            inquiry.status = status;
        }
        if let Some(selected) = self.selected.as_mut().filter(|i| i.id == id) {
            selected.status = status;
        }
    }
}
