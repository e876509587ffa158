use std::fmt::Write;

use crate::app::reports::filter_reports;
use crate::app::triage::{DialogState, ReportDialog};
use crate::domain::moderation::{Report, ReportStatus, StatusFilter};
use crate::views::layout::state;
use crate::views::previews::preview;
use crate::views::{
    avatar, escape, format_opt, report_path, Links, Section, CLOCK_PERIOD, LONG_DATE, SHORT_DATE,
};

/// Where the status filter form submits, plus query values it must keep.
pub struct TableTarget<'a> {
    pub path: &'a str,
    pub keep: &'a [(&'a str, &'a str)],
}

pub fn reports_table(
    reports: &Section<Vec<Report>>,
    filter: StatusFilter,
    target: &TableTarget<'_>,
    links: &Links,
) -> String {
    let mut html = String::from("<section class=\"card reports\"><div class=\"card-header\"><h2>Reports</h2>");
    html.push_str(&filter_form(filter, target));
    html.push_str("</div>");

    let rows = match reports {
        Err(message) => {
            html.push_str(&state(message));
            html.push_str("</section>");
            return html;
        }
        Ok(reports) => filter_reports(reports, filter),
    };

    if rows.is_empty() {
        html.push_str(&state("No reports found"));
        html.push_str("</section>");
        return html;
    }

    html.push_str(
        "<table><thead><tr><th>Type</th><th>Reporter</th><th>Reason</th>\
         <th>Status</th><th>Date</th><th>Actions</th></tr></thead><tbody>",
    );
    for report in rows {
        html.push_str(&report_row(report, links));
    }
    html.push_str("</tbody></table></section>");
    html
}

fn filter_form(filter: StatusFilter, target: &TableTarget<'_>) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<form method=\"get\" action=\"{}\"><label>Status: <select name=\"status\">",
        escape(target.path)
    )
    .ok();

    let options = std::iter::once(StatusFilter::All)
        .chain(ReportStatus::ALL.into_iter().map(StatusFilter::Only));
    for option in options {
        let label = match option {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        };
        let selected = if option == filter { " selected" } else { "" };
        writeln!(
            html,
            "<option value=\"{}\"{selected}>{label}</option>",
            option.as_str()
        )
        .ok();
    }
    html.push_str("</select></label>");

    for (key, value) in target.keep {
        writeln!(
            html,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            escape(key),
            escape(value)
        )
        .ok();
    }
    html.push_str("<button type=\"submit\">Apply</button></form>");
    html
}

fn report_row(report: &Report, links: &Links) -> String {
    let path = escape(&report_path(&report.id)).into_owned();
    format!(
        "<tr><td><span class=\"badge\">{kind}</span></td>\
         <td><a href=\"{profile}\" target=\"_blank\">{avatar}{username}</a></td>\
         <td>{title}</td>\
         <td><span class=\"badge {status}\">{status}</span></td>\
         <td class=\"muted\">{date}</td>\
         <td><a href=\"{path}\">View</a> <a href=\"{path}/delete\">Delete</a></td></tr>",
        kind = report.kind.as_str(),
        profile = escape(&links.profile(&report.user.username)),
        avatar = avatar(&report.user, ""),
        username = escape(&report.user.username),
        title = escape(&report.title),
        status = report.status.as_str(),
        date = format_opt(report.created_at, SHORT_DATE),
    )
}

/// The report detail dialog: preview on the left, report facts and
/// controls on the right.
pub fn report_dialog(dialog: &ReportDialog, controls_enabled: bool, links: &Links) -> String {
    let report = &dialog.report;
    let mut html = String::from("<section class=\"card dialog\"><div class=\"entity\">");

    match &dialog.state {
        DialogState::Closed | DialogState::Loading => html.push_str(&state("Loading")),
        DialogState::Loaded(loaded) => html.push_str(&preview(loaded, links)),
        DialogState::Empty => html.push_str(&state("Content unavailable")),
        DialogState::Failed(message) => html.push_str(&state(message)),
    }

    html.push_str("</div><aside>");
    writeln!(
        html,
        "<h3>Reason</h3><p>{}</p><h3>Description</h3><p>{}</p>",
        escape(&report.title),
        escape(&report.description)
    )
    .ok();

    if !report.images.is_empty() {
        html.push_str("<div class=\"images\">");
        for image in &report.images {
            writeln!(
                html,
                "<a href=\"{0}\" target=\"_blank\"><img src=\"{0}\" alt=\"\" width=\"96\"></a>",
                escape(image)
            )
            .ok();
        }
        html.push_str("</div>");
    }

    writeln!(
        html,
        "<h3>Reported by</h3><p><a href=\"{}\" target=\"_blank\">{}{}</a></p>\
         <h3>Reported on</h3><p>{} <span class=\"muted\">{}</span></p>",
        escape(&links.profile(&report.user.username)),
        avatar(&report.user, ""),
        escape(&report.user.username),
        format_opt(report.created_at, LONG_DATE),
        format_opt(report.created_at, CLOCK_PERIOD)
    )
    .ok();

    html.push_str(&status_form(dialog, controls_enabled));

    let disabled = if controls_enabled { "" } else { " aria-disabled=\"true\"" };
    writeln!(
        html,
        "<p><a href=\"{}/delete\"{disabled}>Delete report</a> <a href=\"/reports\">Close</a></p>",
        escape(&report_path(&report.id))
    )
    .ok();

    html.push_str("</aside></section>");
    html
}

fn status_form(dialog: &ReportDialog, controls_enabled: bool) -> String {
    let disabled = if controls_enabled { "" } else { " disabled" };
    let mut html = String::new();
    writeln!(
        html,
        "<form method=\"post\" action=\"{}/status\"><label>Status \
         <select name=\"status\"{disabled}>",
        escape(&report_path(&dialog.report.id))
    )
    .ok();
    for status in ReportStatus::ALL {
        let selected = if status == dialog.status { " selected" } else { "" };
        writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            status.as_str(),
            status.label()
        )
        .ok();
    }
    writeln!(html, "</select></label><button type=\"submit\"{disabled}>Update</button></form>").ok();
    html
}

pub fn delete_confirmation(report: &Report) -> String {
    let path = escape(&report_path(&report.id)).into_owned();
    format!(
        "<section class=\"card\"><h2>Delete Report</h2>\
         <p>Are you sure you want to delete this report? This action cannot be undone.</p>\
         <p class=\"muted\">{title}</p>\
         <form method=\"post\" action=\"{path}/delete\">\
         <a href=\"/reports\">Cancel</a> <button type=\"submit\">Delete</button></form></section>",
        title = escape(&report.title),
    )
}
