use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The author/reporter summary embedded in reports, posts, comments and chats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub avatar: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl BasicUser {
    /// First character of the username, used where an avatar image is missing.
    pub fn initial(&self) -> String {
        self.username.chars().next().map(String::from).unwrap_or_default()
    }
}

/// Full profile returned by the entity endpoint for `kind=user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub avatar: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub posts_count: u64,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    Local,
    Google,
    #[serde(other)]
    Other,
}

impl LoginType {
    /// Label shown in the users table; local accounts sign in with email.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "email",
            Self::Google => "google",
            Self::Other => "other",
        }
    }
}

/// A row of the user management table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub is_mail_verified: bool,
    pub login_type: LoginType,
    #[serde(default)]
    pub sessions: u64,
}
