//! Status enums for inquiries and users.

use serde::{Deserialize, Serialize};

/// Error returned when a status, filter, or role string is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Lifecycle state of a contact inquiry.
///
/// Stored as lowercase text in `contact_inquiries.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl InquiryStatus {
    /// Every status, in the order the admin UI lists them.
    pub const ALL: [Self; 3] = [Self::Unread, Self::Read, Self::Replied];

    /// Wire value used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }

    /// Label shown in the admin UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unread => "미읽음",
            Self::Read => "읽음",
            Self::Replied => "답변완료",
        }
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            _ => Err(ParseStatusError::new("inquiry status", s)),
        }
    }
}

/// Inbox filter: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InquiryFilter {
    #[default]
    All,
    Only(InquiryStatus),
}

impl InquiryFilter {
    /// Filter buttons, in display order.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Only(InquiryStatus::Unread),
        Self::Only(InquiryStatus::Read),
        Self::Only(InquiryStatus::Replied),
    ];

    /// The equality predicate to apply, if any.
    #[must_use]
    pub const fn status(self) -> Option<InquiryStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Label shown on the filter button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "전체",
            Self::Only(status) => status.label(),
        }
    }

    /// Whether an inquiry with `status` belongs in this view.
    #[must_use]
    pub fn matches(self, status: InquiryStatus) -> bool {
        self.status().is_none_or(|wanted| wanted == status)
    }
}

impl std::fmt::Display for InquiryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InquiryFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<InquiryStatus>()
            .map(Self::Only)
            .map_err(|_| ParseStatusError::new("inquiry filter", s))
    }
}

impl TryFrom<String> for InquiryFilter {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InquiryFilter> for String {
    fn from(filter: InquiryFilter) -> Self {
        filter.as_str().to_owned()
    }
}

/// Role stored in `user_profiles.role` and in the auth claim
/// `app_metadata.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Every role, in the order the role select lists them.
    pub const ALL: [Self; 2] = [Self::User, Self::Admin];

    /// Wire value used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may enter the admin back-office.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseStatusError::new("user role", s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_status_parses_wire_values() {
        for status in InquiryStatus::ALL {
            assert_eq!(status.as_str().parse::<InquiryStatus>().unwrap(), status);
        }
        assert!("archived".parse::<InquiryStatus>().is_err());
    }

    #[test]
    fn test_inquiry_status_labels() {
        assert_eq!(InquiryStatus::Unread.label(), "미읽음");
        assert_eq!(InquiryStatus::Read.label(), "읽음");
        assert_eq!(InquiryStatus::Replied.label(), "답변완료");
    }

    #[test]
    fn test_inquiry_status_serde_is_lowercase() {
        let json = serde_json::to_string(&InquiryStatus::Replied).unwrap();
        assert_eq!(json, "\"replied\"");
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<InquiryFilter>().unwrap(), InquiryFilter::All);
        assert_eq!(
            "replied".parse::<InquiryFilter>().unwrap(),
            InquiryFilter::Only(InquiryStatus::Replied)
        );
        let err = "bogus".parse::<InquiryFilter>().unwrap_err();
        assert_eq!(err.to_string(), "invalid inquiry filter: bogus");
    }

    #[test]
    fn test_filter_matches() {
        let replied = InquiryFilter::Only(InquiryStatus::Replied);
        assert!(replied.matches(InquiryStatus::Replied));
        assert!(!replied.matches(InquiryStatus::Read));
        assert!(InquiryFilter::All.matches(InquiryStatus::Unread));
    }

    #[test]
    fn test_filter_labels_in_order() {
        let labels: Vec<_> = InquiryFilter::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["전체", "미읽음", "읽음", "답변완료"]);
    }

    #[test]
    fn test_filter_deserializes_from_query_value() {
        let filter: InquiryFilter = serde_json::from_str("\"unread\"").unwrap();
        assert_eq!(filter, InquiryFilter::Only(InquiryStatus::Unread));
    }

    #[test]
    fn test_user_role() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::User.is_admin());
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
