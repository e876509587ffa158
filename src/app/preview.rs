//! Preview variants for reported content.
//!
//! A [`Preview`] is built from the resolved [`Entity`] and is read-only from
//! then on. The chat variant is the exception: it loads the conversation
//! history itself, once, when it is mounted.

use std::collections::HashSet;

use time::Date;

use crate::domain::chat::{Chat, Message};
use crate::domain::engagement::{Comment, Reaction};
use crate::domain::entity::Entity;
use crate::domain::moderation::ReportKind;
use crate::domain::post::Post;
use crate::domain::user::User;
use crate::infra::api::AdminApi;

/// Distinct reaction glyphs shown next to a message.
const REACTION_GLYPHS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Post(Post),
    Comment(Comment),
    Chat(ChatPreview),
    User(User),
    Placeholder(ReportKind),
}

impl Preview {
    /// `reporter_id` marks the reporter's side of a chat transcript.
    pub fn from_entity(entity: Entity, reporter_id: &str) -> Self {
        match entity {
            Entity::Post(post) => Self::Post(post),
            Entity::Comment(comment) => Self::Comment(comment),
            Entity::Chat(chat) => Self::Chat(ChatPreview::new(chat, reporter_id)),
            Entity::User(user) => Self::User(user),
            Entity::Placeholder(kind) => Self::Placeholder(kind),
        }
    }

    pub async fn mount<A>(&mut self, api: &A)
    where
        A: AdminApi + ?Sized,
    {
        match self {
            Self::Chat(chat) => chat.mount(api).await,
            Self::Post(_) | Self::Comment(_) | Self::User(_) | Self::Placeholder(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transcript {
    NotLoaded,
    Loaded(Vec<Message>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatPreview {
    pub chat: Chat,
    pub reporter_id: String,
    pub transcript: Transcript,
}

impl ChatPreview {
    pub fn new(chat: Chat, reporter_id: &str) -> Self {
        Self {
            chat,
            reporter_id: reporter_id.to_string(),
            transcript: Transcript::NotLoaded,
        }
    }

    /// Fetches the message history the first time it is called.
    pub async fn mount<A>(&mut self, api: &A)
    where
        A: AdminApi + ?Sized,
    {
        if self.transcript != Transcript::NotLoaded {
            return;
        }

        self.transcript = match api.list_messages(&self.chat.id).await {
            Ok(messages) => Transcript::Loaded(messages),
            Err(err) => {
                tracing::error!(error = ?err, chat_id = %self.chat.id, "failed to load chat messages");
                Transcript::Failed(err.user_message())
            }
        };
    }

    pub fn side_of(&self, message: &Message) -> Side {
        if message.sent_by(&self.reporter_id) {
            Side::Reporter
        } else {
            Side::Other
        }
    }
}

/// Which side of the conversation a message sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reporter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSummary {
    pub glyphs: String,
    /// Total number of reactions, present only when it exceeds the glyphs shown.
    pub total: Option<usize>,
}

pub fn summarize_reactions(reactions: &[Reaction]) -> ReactionSummary {
    let mut seen = HashSet::new();
    let mut glyphs = String::new();
    for reaction in reactions {
        if seen.len() == REACTION_GLYPHS {
            break;
        }
        if seen.insert(reaction.content.as_str()) {
            glyphs.push_str(&reaction.content);
        }
    }

    ReactionSummary {
        glyphs,
        total: (reactions.len() > seen.len()).then_some(reactions.len()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptItem<'a> {
    DaySeparator(Date),
    Message(&'a Message),
}

/// Interleaves day separators with messages: one before the first message of
/// every calendar day. Undated messages never open a new day.
pub fn transcript_items(messages: &[Message]) -> Vec<TranscriptItem<'_>> {
    let mut items = Vec::with_capacity(messages.len());
    let mut current: Option<Date> = None;

    for message in messages {
        let day = message.created_at.map(|created_at| created_at.date());
        if let Some(day) = day {
            if current != Some(day) {
                items.push(TranscriptItem::DaySeparator(day));
                current = Some(day);
            }
        }
        items.push(TranscriptItem::Message(message));
    }

    items
}

/// Splits `text` around its first `https://` link: text before, the link,
/// and whatever follows the link.
pub fn split_first_link(text: &str) -> Option<(&str, &str, &str)> {
    let start = text.find("https://")?;
    let (before, rest) = text.split_at(start);
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (link, after) = rest.split_at(end);
    Some((before, link, after))
}

/// `(lat, lon)` from a maps link of the form `...?q=lat,lon`.
pub fn location_coordinates(content: &str) -> Option<(&str, &str)> {
    let (_, query) = content.split_once("?q=")?;
    let query = query.split('&').next()?;
    let (lat, lon) = query.split_once(',')?;
    let (lat, lon) = (lat.trim(), lon.trim());
    if lat.is_empty() || lon.is_empty() {
        return None;
    }
    Some((lat, lon))
}

/// Static map snapshot centred on the shared location.
pub fn location_snapshot_url(content: &str, api_key: &str) -> Option<String> {
    let (lat, lon) = location_coordinates(content)?;
    let center = format!("{lon},{lat}");
    let mut url = url::Url::parse("https://maps.geoapify.com/v1/staticmap").ok()?;
    url.query_pairs_mut()
        .append_pair("style", "osm-bright-smooth")
        .append_pair("width", "240")
        .append_pair("height", "240")
        .append_pair("center", &format!("lonlat:{center}"))
        .append_pair("zoom", "15")
        .append_pair("scaleFactor", "2")
        .append_pair("marker", &format!("lonlat:{center};color:#ff0000;size:small"))
        .append_pair("apiKey", api_key);
    Some(url.into())
}

/// Asset URL that makes the media host serve the file as an attachment.
pub fn document_download_url(content: &str) -> String {
    content.replacen("/upload", "/upload/fl_attachment", 1)
}

/// Short label for a document: its last ten characters.
pub fn document_label(content: &str) -> String {
    let count = content.chars().count();
    let tail: String = content.chars().skip(count.saturating_sub(10)).collect();
    format!("...{tail}")
}
