use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::user::BasicUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: BasicUser,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub content: String,
}
