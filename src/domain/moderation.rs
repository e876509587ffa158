use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::user::BasicUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    pub entity_id: String,
    pub kind: ReportKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub user: BasicUser,
    pub status: ReportStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// What a report points at. Selects both the entity fetch and the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Post,
    Comment,
    User,
    Chat,
    Problem,
    Story,
    Confession,
    #[serde(other)]
    Unknown,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::User => "user",
            Self::Chat => "chat",
            Self::Problem => "problem",
            Self::Story => "story",
            Self::Confession => "confession",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [Self::Pending, Self::Resolved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "resolved" => Some(Self::Resolved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Selector for the report list: one status, or everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

impl StatusFilter {
    /// Anything that is not a known status selects all reports.
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(ReportStatus::parse)
            .map(Self::Only)
            .unwrap_or(Self::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: ReportStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_kind_does_not_fail_decoding() {
        let report: Report = serde_json::from_value(json!({
            "_id": "r1",
            "entityId": "e1",
            "kind": "livestream",
            "title": "spam",
            "description": "",
            "images": [],
            "user": { "_id": "u1", "username": "ana" },
            "status": "pending",
            "createdAt": "2024-01-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(report.kind, ReportKind::Unknown);
        assert!(report.created_at.is_some());
    }

    #[test]
    fn status_filter_falls_back_to_all() {
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("bogus")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("resolved")),
            StatusFilter::Only(ReportStatus::Resolved)
        );
    }
}
