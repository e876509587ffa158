use std::fmt::Write;

use crate::app::preview::{
    document_download_url, document_label, location_snapshot_url, split_first_link,
    summarize_reactions, transcript_items, ChatPreview, Preview, Side, Transcript, TranscriptItem,
};
use crate::domain::chat::{Message, MessageKind};
use crate::domain::engagement::Comment;
use crate::domain::moderation::ReportKind;
use crate::domain::post::{Post, PostKind};
use crate::domain::user::User;
use crate::views::layout::state;
use crate::views::{
    avatar, avatar_parts, escape, format_at, plural, Links, CLOCK, CLOCK_PERIOD, DATE,
    DAY_HEADING,
};

pub fn preview(preview: &Preview, links: &Links) -> String {
    match preview {
        Preview::Post(post) => post_preview(post, links),
        Preview::Comment(comment) => comment_preview(comment),
        Preview::Chat(chat) => chat_preview(chat, links),
        Preview::User(user) => user_preview(user, links),
        Preview::Placeholder(kind) => placeholder(*kind),
    }
}

fn author(post: &Post, links: &Links) -> String {
    format!(
        "<a class=\"author\" href=\"{}\" target=\"_blank\">{} <span>{}</span> \
         <span class=\"muted\">@{}</span></a>",
        escape(&links.profile(&post.user.username)),
        avatar(&post.user, ""),
        escape(&post.user.full_name),
        escape(&post.user.username)
    )
}

pub fn post_preview(post: &Post, links: &Links) -> String {
    let mut html = String::from("<div class=\"preview post\">");
    html.push_str(&author(post, links));

    match post.kind {
        PostKind::Video => {
            let src = post.media.first().map(String::as_str).unwrap_or("");
            writeln!(
                html,
                "<video src=\"{}\" controls controlsList=\"nodownload\"></video>",
                escape(src)
            )
            .ok();
        }
        PostKind::Image => {
            let count = post.media.len();
            html.push_str("<div class=\"carousel\">");
            for (index, media) in post.media.iter().enumerate() {
                html.push_str("<figure>");
                if count > 1 {
                    writeln!(html, "<span class=\"counter\">{}/{}</span>", index + 1, count).ok();
                }
                writeln!(
                    html,
                    "<img src=\"{}\" alt=\"Post by {} with username {}\"></figure>",
                    escape(post.display_image(media)),
                    escape(&post.user.full_name),
                    escape(&post.user.username)
                )
                .ok();
            }
            html.push_str("</div>");
        }
    }

    writeln!(
        html,
        "<p class=\"muted\">&#9829; {} &middot; &#128172; {}</p>",
        post.likes_count, post.comments_count
    )
    .ok();
    if let Some(caption) = post.short_caption() {
        writeln!(html, "<p>{}</p>", escape(&caption)).ok();
    }
    if let Some(created_at) = post.created_at {
        writeln!(
            html,
            "<p class=\"muted\"><span>{}</span> <span>{}</span></p>",
            format_at(created_at, CLOCK),
            format_at(created_at, DATE)
        )
        .ok();
    }

    html.push_str("</div>");
    html
}

pub fn comment_preview(comment: &Comment) -> String {
    let mut html = String::from("<div class=\"preview comment\">");
    writeln!(
        html,
        "{}<span>{}</span>",
        avatar(&comment.user, ""),
        escape(&comment.user.username)
    )
    .ok();
    if let Some(created_at) = comment.created_at {
        writeln!(
            html,
            " <span class=\"muted\">&middot; {} {}</span>",
            format_at(created_at, CLOCK),
            format_at(created_at, DATE)
        )
        .ok();
    }
    writeln!(
        html,
        "<p>{}</p><p class=\"muted\">&#9829; {}</p></div>",
        escape(&comment.content),
        plural(comment.likes_count, "like")
    )
    .ok();
    html
}

pub fn user_preview(user: &User, links: &Links) -> String {
    let mut html = String::from("<div class=\"preview user\">");
    writeln!(
        html,
        "{}<h2>{}</h2><p class=\"muted\">@{}</p>",
        avatar_parts(&user.avatar, &user.username, "large"),
        escape(&user.full_name),
        escape(&user.username)
    )
    .ok();
    if let Some(caption) = user.caption.as_deref() {
        writeln!(html, "<p>{}</p>", escape(caption)).ok();
    }
    writeln!(
        html,
        "<p class=\"muted\">{} Posts &middot; {} Followers &middot; {} Following</p>",
        user.posts_count, user.followers_count, user.following_count
    )
    .ok();
    writeln!(
        html,
        "<p><a href=\"mailto:{0}\" target=\"_blank\">{0}</a></p>",
        escape(&user.email)
    )
    .ok();
    if let Some(created_at) = user.created_at {
        writeln!(html, "<p class=\"muted\">Joined {}</p>", format_at(created_at, DATE)).ok();
    }
    writeln!(
        html,
        "<a class=\"button\" href=\"{}\" target=\"_blank\">View Full Profile</a></div>",
        escape(&links.profile(&user.username))
    )
    .ok();
    html
}

fn placeholder(kind: ReportKind) -> String {
    let label = match kind {
        ReportKind::Story => "Story reports carry no preview. Review the reason and images.",
        ReportKind::Confession => {
            "Confession reports carry no preview. Review the reason and images."
        }
        ReportKind::Problem => "Problem reports describe an issue with the app itself.",
        ReportKind::Post
        | ReportKind::Comment
        | ReportKind::User
        | ReportKind::Chat
        | ReportKind::Unknown => "Nothing to preview.",
    };
    format!(
        "<div class=\"preview placeholder\"><span class=\"badge\">{}</span>{}</div>",
        kind.as_str(),
        state(label)
    )
}

pub fn chat_preview(chat: &ChatPreview, links: &Links) -> String {
    let mut html = String::from("<div class=\"preview chat\"><div class=\"transcript\">");

    match &chat.transcript {
        Transcript::NotLoaded => html.push_str(&state("Loading messages")),
        Transcript::Failed(message) => html.push_str(&state(message)),
        Transcript::Loaded(messages) if messages.is_empty() => {
            html.push_str(&state("No messages"))
        }
        Transcript::Loaded(messages) => {
            for item in transcript_items(messages) {
                match item {
                    TranscriptItem::DaySeparator(day) => {
                        let heading = day
                            .format(DAY_HEADING)
                            .unwrap_or_else(|_| day.to_string());
                        writeln!(html, "<div class=\"day\">{}</div>", escape(&heading)).ok();
                    }
                    TranscriptItem::Message(message) => {
                        html.push_str(&bubble(message, chat.side_of(message), links));
                    }
                }
            }
        }
    }

    html.push_str("</div><div class=\"participants\"><p class=\"muted\">PARTICIPANTS:</p>");
    let names: Vec<String> = chat
        .chat
        .users
        .iter()
        .map(|user| {
            format!(
                "{}<a href=\"{}\" target=\"_blank\">{}</a>",
                avatar(user, ""),
                escape(&links.profile(&user.username)),
                escape(&user.username)
            )
        })
        .collect();
    html.push_str(&names.join(", "));
    html.push_str("</div></div>");
    html
}

fn bubble(message: &Message, side: Side, links: &Links) -> String {
    let side = match side {
        Side::Reporter => "reporter",
        Side::Other => "other",
    };
    let mut html = format!("<div class=\"bubble {side}\">");

    match message.kind {
        MessageKind::Message | MessageKind::Unknown => {
            writeln!(html, "<div class=\"text\">{}</div>", linkify(&message.content)).ok();
        }
        MessageKind::Location => html.push_str(&location(&message.content, links)),
        MessageKind::Image => {
            writeln!(html, "<img src=\"{}\" alt=\"\" width=\"160\">", escape(&message.content)).ok();
        }
        MessageKind::Video => {
            writeln!(
                html,
                "<video src=\"{}\" width=\"160\" controlsList=\"nodownload\"></video>",
                escape(&message.content)
            )
            .ok();
        }
        MessageKind::Audio => {
            writeln!(html, "<audio src=\"{}\" controls></audio>", escape(&message.content)).ok();
        }
        MessageKind::Document => {
            writeln!(
                html,
                "<div class=\"document\">&#128196; {} <a href=\"{}\" download>Download</a></div>",
                escape(&document_label(&message.content)),
                escape(&document_download_url(&message.content))
            )
            .ok();
        }
        MessageKind::Post => html.push_str(&shared_post(message.post.as_ref(), links)),
    }

    if !message.reacts.is_empty() {
        let summary = summarize_reactions(&message.reacts);
        write!(html, "<div class=\"reacts\">{}", escape(&summary.glyphs)).ok();
        if let Some(total) = summary.total {
            write!(html, "<span>{total}</span>").ok();
        }
        html.push_str("</div>");
    }
    if let Some(created_at) = message.created_at {
        writeln!(
            html,
            "<span class=\"muted\">{}</span>",
            format_at(created_at, CLOCK_PERIOD)
        )
        .ok();
    }

    html.push_str("</div>");
    html
}

/// Escaped text with its first `https://` link made clickable.
fn linkify(content: &str) -> String {
    match split_first_link(content) {
        Some((before, link, after)) => format!(
            "{}<a href=\"{}\" target=\"_blank\">{}</a>{}",
            escape(before),
            escape(link),
            escape(link),
            escape(after)
        ),
        None => escape(content).into_owned(),
    }
}

fn location(content: &str, links: &Links) -> String {
    match location_snapshot_url(content, &links.maps_api_key) {
        Some(snapshot) => format!(
            "<a href=\"{}\" target=\"_blank\"><img src=\"{}\" alt=\"\" width=\"240\" height=\"240\"></a>",
            escape(content),
            escape(&snapshot)
        ),
        None => format!(
            "<a href=\"{0}\" target=\"_blank\">{0}</a>",
            escape(content)
        ),
    }
}

fn shared_post(post: Option<&Post>, links: &Links) -> String {
    let Some(post) = post else {
        return "<div class=\"shared-post\"><h3>Post unavailable</h3>\
                <p class=\"muted\">This might have been deleted or is no longer available.</p></div>"
            .to_string();
    };

    let mut html = String::new();
    writeln!(
        html,
        "<a class=\"shared-post\" href=\"{}\" target=\"_blank\">{} <strong>{}</strong> \
         <span class=\"muted\">@{}</span><img src=\"{}\" alt=\"\" width=\"240\">",
        escape(&links.web(&post.public_path())),
        avatar(&post.user, ""),
        escape(&post.user.full_name),
        escape(&post.user.username),
        escape(post.cover())
    )
    .ok();
    if post.kind == PostKind::Video {
        html.push_str("<span class=\"play\">&#9654;</span>");
    }
    if let Some(caption) = post.caption.as_deref().filter(|caption| !caption.is_empty()) {
        writeln!(html, "<span>{}</span>", escape(caption)).ok();
    }
    html.push_str("</a>");
    html
}
