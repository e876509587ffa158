use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::user::BasicUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: BasicUser,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub kind: PostKind,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Image,
    Video,
}

impl Post {
    /// Image shown for a media slot: the media itself for image posts, the
    /// thumbnail for videos.
    pub fn display_image<'a>(&'a self, media: &'a str) -> &'a str {
        match self.kind {
            PostKind::Image => media,
            PostKind::Video => self.thumbnail.as_deref().unwrap_or(""),
        }
    }

    pub fn cover(&self) -> &str {
        match self.kind {
            PostKind::Image => self.media.first().map(String::as_str).unwrap_or(""),
            PostKind::Video => self.thumbnail.as_deref().unwrap_or(""),
        }
    }

    /// Caption cut to the first 30 characters for previews.
    pub fn short_caption(&self) -> Option<String> {
        self.caption
            .as_deref()
            .filter(|caption| !caption.is_empty())
            .map(|caption| caption.chars().take(30).collect())
    }

    /// Path of this post on the public web app.
    pub fn public_path(&self) -> String {
        match self.kind {
            PostKind::Video => format!("video/{}", self.id),
            PostKind::Image => format!("post/{}", self.id),
        }
    }
}
