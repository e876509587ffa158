use serde_json::Value;

use crate::domain::chat::Chat;
use crate::domain::engagement::Comment;
use crate::domain::moderation::ReportKind;
use crate::domain::post::Post;
use crate::domain::user::User;

/// The content a report points at, resolved by the report's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Post(Post),
    Comment(Comment),
    Chat(Chat),
    User(User),
    /// Kinds with nothing to fetch (problem, story, confession).
    Placeholder(ReportKind),
}

impl Entity {
    /// Decodes an entity payload according to the kind it was requested with.
    pub fn decode(kind: ReportKind, payload: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            ReportKind::Post => Self::Post(serde_json::from_value(payload)?),
            ReportKind::Comment => Self::Comment(serde_json::from_value(payload)?),
            ReportKind::Chat => Self::Chat(serde_json::from_value(payload)?),
            ReportKind::User => Self::User(serde_json::from_value(payload)?),
            ReportKind::Problem
            | ReportKind::Story
            | ReportKind::Confession
            | ReportKind::Unknown => Self::Placeholder(kind),
        })
    }
}
