//! Server-rendered HTML.
//!
//! Every renderer writes into a `String`; values coming from the admin API
//! go through [`escape`] before they reach the markup.

pub mod cards;
pub mod layout;
pub mod pages;
pub mod previews;
pub mod reports;
pub mod users;

use std::borrow::Cow;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::domain::user::BasicUser;

/// A page section: its data, or the message to show in its place.
pub type Section<T> = Result<T, String>;

/// Where outbound links point.
#[derive(Debug, Clone)]
pub struct Links {
    pub public_web_url: String,
    pub maps_api_key: String,
}

impl Links {
    pub fn profile(&self, username: &str) -> String {
        format!("{}/{}", self.public_web_url, username)
    }

    pub fn web(&self, path: &str) -> String {
        format!("{}/{}", self.public_web_url, path)
    }
}

/// Path of a report's detail page, with the id percent-encoded.
pub fn report_path(id: &str) -> String {
    let id: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("/reports/{}", id.replace('+', "%20"))
}

pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

pub const SHORT_DATE: &[FormatItem<'static>] =
    format_description!("[day padding:none]/[month padding:none]/[year]");
pub const DATE: &[FormatItem<'static>] = format_description!("[day]/[month]/[year]");
pub const LONG_DATE: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");
pub const DAY_HEADING: &[FormatItem<'static>] =
    format_description!("[day padding:none] [month repr:short], [year]");
pub const CLOCK: &[FormatItem<'static>] = format_description!("[hour repr:12]:[minute]");
pub const CLOCK_PERIOD: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period case:lower]");

pub fn format_at(at: OffsetDateTime, format: &[FormatItem<'_>]) -> String {
    at.format(format).unwrap_or_default()
}

pub fn format_opt(at: Option<OffsetDateTime>, format: &[FormatItem<'_>]) -> String {
    at.map(|at| format_at(at, format)).unwrap_or_default()
}

/// `1234567` as `1,234,567`.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Avatar image, or the username's first letter when there is none.
pub fn avatar(user: &BasicUser, class: &str) -> String {
    avatar_parts(&user.avatar, &user.username, class)
}

pub fn avatar_parts(src: &str, username: &str, class: &str) -> String {
    if src.is_empty() {
        let initial = username.chars().next().map(String::from).unwrap_or_default();
        format!(
            "<span class=\"avatar {}\">{}</span>",
            escape(class),
            escape(&initial)
        )
    } else {
        format!(
            "<img class=\"avatar {}\" src=\"{}\" alt=\"\">",
            escape(class),
            escape(src)
        )
    }
}

/// Singular or plural label for `count`.
pub fn plural(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}
