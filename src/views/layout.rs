use std::fmt::Write;

use serde::Deserialize;

use crate::views::escape;

/// Toast carried across a redirect in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notice {
    pub success: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl Notice {
    fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("success", self.success.as_deref()),
            ("warning", self.warning.as_deref()),
            ("error", self.error.as_deref()),
        ]
        .into_iter()
        .filter_map(|(level, message)| {
            message
                .filter(|message| !message.is_empty())
                .map(|message| (level, message))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Dashboard,
    Analytics,
    Reports,
    Users,
    None,
}

pub struct Page<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub nav: Nav,
    pub logged_in: bool,
    pub notice: &'a Notice,
}

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#0c0a09;color:#e7e5e4}\
a{color:#60a5fa}nav{position:fixed;inset:0 auto 0 0;width:14rem;padding:1.5rem;background:#1c1917}\
nav a{display:block;padding:.5rem 0;text-decoration:none;color:#a8a29e}nav a.active{color:#fff;font-weight:600}\
main{margin-left:17rem;padding:2rem}.grid{display:grid;gap:1rem;grid-template-columns:repeat(auto-fit,minmax(16rem,1fr))}\
.card{background:#1c1917;border-radius:.75rem;padding:1rem;margin-bottom:1rem}\
.value{font-size:2rem;font-weight:700}.muted{color:#a8a29e}.up{color:#16a34a}.down{color:#dc2626}\
table{width:100%;border-collapse:collapse}th,td{text-align:left;padding:.5rem;border-bottom:1px solid #292524}\
.badge{padding:.1rem .5rem;border-radius:1rem;font-size:.8rem;text-transform:capitalize;border:1px solid #44403c}\
.pending{background:#f59e0b99}.resolved{background:#22c55e99}.rejected{background:#ef444499}\
.notice{padding:.75rem 1rem;border-radius:.5rem;margin-bottom:1rem}.notice.success{background:#14532d}\
.notice.warning{background:#713f12}.notice.error{background:#7f1d1d}\
.avatar{width:2rem;height:2rem;border-radius:50%;display:inline-flex;align-items:center;justify-content:center;background:#44403c;object-fit:cover}\
.avatar.large{width:8rem;height:8rem;font-size:3rem}.state{text-align:center;padding:2rem}\
.bubble{display:flex;flex-direction:column;gap:.25rem;margin-top:.5rem}.bubble.reporter{align-items:flex-end}\
.bubble.other{align-items:flex-start}.bubble .text{padding:.4rem .75rem;border-radius:.75rem;background:#e7e5e4;color:#0c0a09}\
.bubble.reporter .text{background:#292524;color:#fff}.day{text-align:center;font-size:.75rem;color:#a8a29e}\
.dialog{display:grid;grid-template-columns:2fr 1fr;gap:1rem}button:disabled{opacity:.5}";

pub fn render(page: &Page<'_>, body: &str) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{} | Ciel Admin</title><style>{}</style></head><body>",
        escape(page.title),
        STYLE
    )
    .ok();

    html.push_str(&sidebar(page.nav, page.logged_in));

    html.push_str("<main>");
    html.push_str(&notice_banner(page.notice));
    writeln!(
        html,
        "<header><h1>{}</h1><p class=\"muted\">{}</p></header>",
        escape(page.title),
        escape(page.subtitle)
    )
    .ok();
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

fn sidebar(active: Nav, logged_in: bool) -> String {
    let mut html = String::from("<nav><h2>Ciel Admin</h2>");
    for (nav, href, label) in [
        (Nav::Dashboard, "/", "Dashboard"),
        (Nav::Analytics, "/analytics", "Analytics"),
        (Nav::Reports, "/reports", "Reports"),
        (Nav::Users, "/users", "Users"),
    ] {
        let class = if nav == active { " class=\"active\"" } else { "" };
        writeln!(html, "<a href=\"{href}\"{class}>{label}</a>").ok();
    }

    if logged_in {
        html.push_str(
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>",
        );
    } else {
        html.push_str("<a href=\"/login\">Login</a>");
    }
    html.push_str("</nav>");
    html
}

pub fn notice_banner(notice: &Notice) -> String {
    let mut html = String::new();
    for (level, message) in notice.entries() {
        writeln!(
            html,
            "<div class=\"notice {level}\" role=\"status\">{}</div>",
            escape(message)
        )
        .ok();
    }
    html
}

/// The message block shown in place of a section that has nothing to show.
pub fn state(message: &str) -> String {
    format!(
        "<div class=\"state\"><p><strong>{}</strong></p></div>",
        escape(message)
    )
}
