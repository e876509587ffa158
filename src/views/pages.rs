use crate::app::metrics::StatsCard;
use crate::app::triage::ReportDialog;
use crate::domain::metrics::{Growth, MessageAnalytics, Period, ReportAnalytics, SeriesPoint};
use crate::domain::moderation::{Report, StatusFilter};
use crate::domain::user::ManagedUser;
use crate::views::cards::{labelled_table, period_picker, series_table, stats_cards};
use crate::views::layout::{self, state, Nav, Notice, Page};
use crate::views::reports::{delete_confirmation, report_dialog, reports_table, TableTarget};
use crate::views::users::{login_types, users_table};
use crate::views::{Links, Section};

/// What every page needs besides its own data.
pub struct Chrome<'a> {
    pub logged_in: bool,
    pub notice: &'a Notice,
    pub links: &'a Links,
}

impl Chrome<'_> {
    fn page<'p>(&'p self, title: &'p str, subtitle: &'p str, nav: Nav) -> Page<'p> {
        Page {
            title,
            subtitle,
            nav,
            logged_in: self.logged_in,
            notice: self.notice,
        }
    }
}

pub struct Dashboard {
    pub cards: Section<Vec<StatsCard>>,
    pub growth: Section<Growth>,
    pub period: Period,
    pub reports: Section<Vec<Report>>,
    pub filter: StatusFilter,
    pub users: Section<Vec<ManagedUser>>,
}

pub fn dashboard(chrome: &Chrome<'_>, data: &Dashboard) -> String {
    let mut body = stats_cards(&data.cards);

    body.push_str("<section class=\"card\"><h2>Growth</h2>");
    body.push_str(&period_picker("/", &Period::GROWTH, data.period, &[]));
    body.push_str("<div class=\"grid\">");
    body.push_str(&series_table(
        "Users",
        data.growth.as_ref().map(|growth| growth.user.as_slice()).map_err(String::as_str),
    ));
    body.push_str(&series_table(
        "Posts",
        data.growth.as_ref().map(|growth| growth.post.as_slice()).map_err(String::as_str),
    ));
    body.push_str("</div></section>");

    let period = data.period.as_str();
    let keep = [("period", period)];
    body.push_str(&reports_table(
        &data.reports,
        data.filter,
        &TableTarget { path: "/", keep: &keep },
        chrome.links,
    ));
    body.push_str(&users_table(&data.users, "", chrome.logged_in, chrome.links));

    layout::render(
        &chrome.page("Dashboard", "Overview of your platform's performance", Nav::Dashboard),
        &body,
    )
}

pub struct AnalyticsPage {
    pub cards: Section<Vec<StatsCard>>,
    pub messages: Section<MessageAnalytics>,
    pub content: Section<Vec<SeriesPoint>>,
    pub calls: Section<Vec<SeriesPoint>>,
}

pub fn analytics(chrome: &Chrome<'_>, data: &AnalyticsPage) -> String {
    let mut body = stats_cards(&data.cards);

    body.push_str("<div class=\"grid\">");
    body.push_str(&series_table(
        "Messages Trend",
        data.messages
            .as_ref()
            .map(|messages| messages.trend.as_slice())
            .map_err(String::as_str),
    ));
    body.push_str(&labelled_table(
        "Messages Breakdown",
        "Type",
        data.messages
            .as_ref()
            .map(|messages| messages.kinds.as_slice())
            .map_err(String::as_str),
    ));
    body.push_str(&labelled_table(
        "Content Distribution",
        "Format",
        data.content.as_deref().map_err(String::as_str),
    ));
    body.push_str(&labelled_table(
        "Calls Distribution",
        "Calls",
        data.calls.as_deref().map_err(String::as_str),
    ));
    body.push_str("</div>");

    layout::render(
        &chrome.page("Analytics", "Detailed insights into your platform metrics", Nav::Analytics),
        &body,
    )
}

pub struct ReportsPage {
    pub cards: Section<Vec<StatsCard>>,
    pub analytics: Section<ReportAnalytics>,
    pub period: Period,
    pub reports: Section<Vec<Report>>,
    pub filter: StatusFilter,
}

pub fn reports(chrome: &Chrome<'_>, data: &ReportsPage) -> String {
    let mut body = stats_cards(&data.cards);

    let status = data.filter.as_str();
    body.push_str("<section class=\"card\"><h2>Report activity</h2>");
    body.push_str(&period_picker("/reports", &Period::REPORTS, data.period, &[("status", status)]));
    body.push_str("<div class=\"grid\">");
    body.push_str(&series_table(
        "Trend",
        data.analytics
            .as_ref()
            .map(|analytics| analytics.trend.as_slice())
            .map_err(String::as_str),
    ));
    body.push_str(&series_table(
        "Distribution",
        data.analytics
            .as_ref()
            .map(|analytics| analytics.distribution.as_slice())
            .map_err(String::as_str),
    ));
    body.push_str("</div></section>");

    let period = data.period.as_str();
    let keep = [("period", period)];
    body.push_str(&reports_table(
        &data.reports,
        data.filter,
        &TableTarget {
            path: "/reports",
            keep: &keep,
        },
        chrome.links,
    ));

    layout::render(
        &chrome.page("Reports", "Review and triage reported content", Nav::Reports),
        &body,
    )
}

pub struct UsersPage {
    pub cards: Section<Vec<StatsCard>>,
    pub growth: Section<Growth>,
    pub period: Period,
    pub users: Section<Vec<ManagedUser>>,
    pub query: String,
}

pub fn users(chrome: &Chrome<'_>, data: &UsersPage) -> String {
    let mut body = stats_cards(&data.cards);

    body.push_str("<div class=\"grid\"><section class=\"card\"><h2>User growth</h2>");
    body.push_str(&period_picker("/users", &Period::GROWTH, data.period, &[("q", data.query.as_str())]));
    body.push_str(&series_table(
        "Users",
        data.growth.as_ref().map(|growth| growth.user.as_slice()).map_err(String::as_str),
    ));
    body.push_str("</section>");
    body.push_str(&login_types(&data.users));
    body.push_str("</div>");
    body.push_str(&users_table(&data.users, &data.query, chrome.logged_in, chrome.links));

    layout::render(
        &chrome.page("User Management", "Manage and monitor your platform users", Nav::Users),
        &body,
    )
}

pub fn report_detail(chrome: &Chrome<'_>, dialog: &ReportDialog, controls_enabled: bool) -> String {
    let title = if dialog.report.title.is_empty() {
        "Report"
    } else {
        dialog.report.title.as_str()
    };
    layout::render(
        &chrome.page(title, dialog.report.kind.as_str(), Nav::Reports),
        &report_dialog(dialog, controls_enabled, chrome.links),
    )
}

pub fn delete_report(chrome: &Chrome<'_>, report: &Report) -> String {
    layout::render(
        &chrome.page("Delete Report", "", Nav::Reports),
        &delete_confirmation(report),
    )
}

pub fn login(notice: &Notice) -> String {
    let body = "<section class=\"card login\">\
        <form method=\"post\" action=\"/login\">\
        <label for=\"username\">Username</label>\
        <input id=\"username\" name=\"username\" placeholder=\"Enter your username\" required>\
        <label for=\"password\">Password</label>\
        <input id=\"password\" name=\"password\" type=\"password\" placeholder=\"Enter your password\" required>\
        <button type=\"submit\">Sign In</button></form>\
        <a href=\"/\">Continue without Logging In</a></section>";

    layout::render(
        &Page {
            title: "Admin Dashboard",
            subtitle: "Sign in to access the admin panel",
            nav: Nav::None,
            logged_in: false,
            notice,
        },
        body,
    )
}

pub fn error(title: &str, message: &str, logged_in: bool) -> String {
    let notice = Notice::default();
    layout::render(
        &Page {
            title,
            subtitle: "",
            nav: Nav::None,
            logged_in,
            notice: &notice,
        },
        &format!(
            "<section class=\"card\">{}<p><a href=\"/\">Back to the dashboard</a></p></section>",
            state(message)
        ),
    )
}
