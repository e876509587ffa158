use std::fmt::Write;

use crate::app::metrics::StatsCard;
use crate::domain::metrics::{Period, SeriesPoint};
use crate::views::layout::state;
use crate::views::{escape, format_count, Section};

pub fn stats_cards(cards: &Section<Vec<StatsCard>>) -> String {
    let cards = match cards {
        Ok(cards) => cards,
        Err(message) => return format!("<section class=\"card\">{}</section>", state(message)),
    };

    let mut html = String::from("<section class=\"grid\">");
    for card in cards {
        html.push_str(&stats_card(card));
    }
    html.push_str("</section>");
    html
}

fn stats_card(card: &StatsCard) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<div class=\"card\"><p class=\"muted\">{}</p><p class=\"value\">{}</p>",
        escape(card.title),
        format_count(card.value)
    )
    .ok();
    if let Some(description) = card.description {
        writeln!(html, "<p class=\"muted\">{}</p>", escape(description)).ok();
    }

    if !card.breakdown.is_empty() {
        html.push_str("<div class=\"breakdown\">");
        for (label, value) in &card.breakdown {
            writeln!(
                html,
                "<ul><li>{}</li><li class=\"muted\">{}</li></ul>",
                format_count(*value),
                escape(label)
            )
            .ok();
        }
        html.push_str("</div>");
    }

    if let Some(trend) = card.trend {
        let class = if trend > 0.0 { "up" } else { "down" };
        writeln!(
            html,
            "<p class=\"{class}\">{trend:.0}% from last month</p>"
        )
        .ok();
    }

    html.push_str("</div>");
    html
}

/// Period picker rendered as links that keep the rest of the query.
pub fn period_picker(path: &str, periods: &[Period], active: Period, extra: &[(&str, &str)]) -> String {
    let mut html = String::from("<div class=\"periods\">");
    for period in periods {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in extra {
            query.append_pair(key, value);
        }
        query.append_pair("period", period.as_str());
        let class = if *period == active { " class=\"active\"" } else { "" };
        writeln!(
            html,
            "<a href=\"{}?{}\"{class}>{}</a> ",
            path,
            escape(&query.finish()),
            period.as_str()
        )
        .ok();
    }
    html.push_str("</div>");
    html
}

/// A trend series as a two-column table.
pub fn series_table(title: &str, series: Result<&[SeriesPoint], &str>) -> String {
    labelled_table(title, "Period", series)
}

/// Named counts as a two-column table.
pub fn labelled_table(title: &str, heading: &str, series: Result<&[SeriesPoint], &str>) -> String {
    let mut html = String::new();
    writeln!(html, "<div class=\"card\"><h3>{}</h3>", escape(title)).ok();

    match series {
        Err(message) => html.push_str(&state(message)),
        Ok([]) => html.push_str(&state("No data")),
        Ok(points) => {
            writeln!(
                html,
                "<table><thead><tr><th>{}</th><th>Count</th></tr></thead><tbody>",
                escape(heading)
            )
            .ok();
            for point in points {
                writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape(&point.label),
                    format_count(point.count)
                )
                .ok();
            }
            html.push_str("</tbody></table>");
        }
    }

    html.push_str("</div>");
    html
}
