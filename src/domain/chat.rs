use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::engagement::Reaction;
use crate::domain::post::Post;
use crate::domain::user::BasicUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub users: Vec<BasicUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub sender: Option<BasicUser>,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub reacts: Vec<Reaction>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Message {
    pub fn sent_by(&self, user_id: &str) -> bool {
        self.sender.as_ref().is_some_and(|sender| sender.id == user_id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Message,
    Location,
    Image,
    Video,
    Audio,
    Document,
    Post,
    #[serde(other)]
    Unknown,
}
