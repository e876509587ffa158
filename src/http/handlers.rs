use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::app::auth::Credentials;
use crate::app::metrics::{
    analytics_cards, calls_breakdown, content_breakdown, dashboard_cards, report_cards, user_cards,
};
use crate::app::reports;
use crate::app::triage::{ReportDialog, TriageError};
use crate::domain::metrics::Period;
use crate::domain::moderation::{Report, ReportStatus, StatusFilter};
use crate::http::auth::login_redirect;
use crate::http::{notify, AdminSession, AppError};
use crate::infra::api::ApiError;
use crate::views::layout::Notice;
use crate::views::pages::{self, Chrome};
use crate::views::{report_path, Section};
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Deserialize)]
pub struct OverviewQuery {
    pub status: Option<String>,
    pub period: Option<String>,
}

#[derive(Deserialize)]
pub struct UsersQuery {
    pub q: Option<String>,
    pub period: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

fn chrome<'a>(state: &'a AppState, notice: &'a Notice) -> Chrome<'a> {
    Chrome {
        logged_in: state.auth.is_logged_in(),
        notice,
        links: &state.links,
    }
}

/// A period from the query string, falling back to weekly when it is missing
/// or not offered on the page.
fn parse_period(value: Option<&str>, offered: &[Period]) -> Period {
    value
        .and_then(Period::parse)
        .filter(|period| offered.contains(period))
        .unwrap_or_default()
}

/// Turns a failed fetch into the message its page section shows.
fn section<T>(result: Result<T, ApiError>, name: &'static str) -> Section<T> {
    result.map_err(|err| {
        tracing::error!(error = ?err, section = name, "failed to load page section");
        err.user_message()
    })
}

async fn find_report(state: &AppState, id: &str) -> Result<Report, AppError> {
    state
        .reports
        .find(&state.api, id)
        .await?
        .ok_or_else(|| AppError::not_found("Report not found"))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
    Query(notice): Query<Notice>,
) -> Html<String> {
    let period = parse_period(query.period.as_deref(), &Period::GROWTH);
    let filter = StatusFilter::parse(query.status.as_deref());

    let (stats, growth, reports, users) = tokio::join!(
        state.api.dashboard(),
        state.api.growth(period),
        state.reports.load(&state.api),
        state.users.load(&state.api),
    );

    let data = pages::Dashboard {
        cards: section(stats, "dashboard").map(|stats| dashboard_cards(&stats)),
        growth: section(growth, "growth"),
        period,
        reports: section(reports, "reports"),
        filter,
        users: section(users, "users"),
    };
    Html(pages::dashboard(&chrome(&state, &notice), &data))
}

pub async fn analytics(
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> Html<String> {
    let (analytics, messages, content) = tokio::join!(
        state.api.analytics(),
        state.api.message_analytics(),
        state.api.content_distribution(),
    );
    let content = section(content, "content-distribution");

    let data = pages::AnalyticsPage {
        cards: section(analytics, "analytics").map(|analytics| analytics_cards(&analytics)),
        messages: section(messages, "message-analytics"),
        calls: content.as_ref().map(calls_breakdown).map_err(String::clone),
        content: content.as_ref().map(content_breakdown).map_err(String::clone),
    };
    Html(pages::analytics(&chrome(&state, &notice), &data))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
    Query(notice): Query<Notice>,
) -> Html<String> {
    let period = parse_period(query.period.as_deref(), &Period::REPORTS);
    let filter = StatusFilter::parse(query.status.as_deref());

    let (overview, analytics, reports) = tokio::join!(
        state.api.reports_overview(),
        state.api.report_analytics(period),
        state.reports.load(&state.api),
    );

    let data = pages::ReportsPage {
        cards: section(overview, "reports-overview").map(|overview| report_cards(&overview)),
        analytics: section(analytics, "report-analytics"),
        period,
        reports: section(reports, "reports"),
        filter,
    };
    Html(pages::reports(&chrome(&state, &notice), &data))
}

pub async fn view_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(notice): Query<Notice>,
) -> Result<Html<String>, AppError> {
    let report = find_report(&state, &id).await?;

    let mut dialog = ReportDialog::new(report);
    dialog.open(&state.api).await;
    let controls_enabled = dialog.controls_enabled(&state.auth, &state.reports);

    Ok(Html(pages::report_detail(
        &chrome(&state, &notice),
        &dialog,
        controls_enabled,
    )))
}

pub async fn update_report_status(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let status = ReportStatus::parse(&form.status)
        .ok_or_else(|| AppError::bad_request("unknown report status"))?;
    let report = find_report(&state, &id).await?;
    let back = report_path(&id);

    let mut dialog = ReportDialog::new(report);
    let redirect = match dialog
        .change_status(&state.api, &state.auth, &state.reports, status)
        .await
    {
        Ok(acknowledged) => notify(
            &back,
            "success",
            &format!("Report marked as {}", acknowledged.as_str()),
        ),
        Err(TriageError::LoginRequired) => login_redirect(),
        Err(err) => notify(&back, "error", &err.user_message()),
    };
    Ok(redirect)
}

pub async fn confirm_delete_report(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(notice): Query<Notice>,
) -> Result<Html<String>, AppError> {
    let report = find_report(&state, &id).await?;
    Ok(Html(pages::delete_report(&chrome(&state, &notice), &report)))
}

pub async fn delete_report(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    match reports::delete_report(&state.api, &state.auth, &state.reports, &id).await {
        Ok(()) => notify("/reports", "success", "Report deleted"),
        Err(TriageError::LoginRequired) => login_redirect(),
        Err(err) => notify("/reports", "error", &err.user_message()),
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
    Query(notice): Query<Notice>,
) -> Html<String> {
    let period = parse_period(query.period.as_deref(), &Period::GROWTH);

    let (stats, growth, users) = tokio::join!(
        state.api.user_stats(),
        state.api.growth(period),
        state.users.load(&state.api),
    );

    let data = pages::UsersPage {
        cards: section(stats, "user-stats").map(|stats| user_cards(&stats)),
        growth: section(growth, "growth"),
        period,
        users: section(users, "users"),
        query: query.q.unwrap_or_default(),
    };
    Html(pages::users(&chrome(&state, &notice), &data))
}

pub async fn remove_unverified_users(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Redirect {
    match state.users.remove_unverified(&state.api, &state.auth).await {
        Ok(()) => notify("/users", "success", "Unverified users removed"),
        Err(TriageError::LoginRequired) => login_redirect(),
        Err(err) => notify("/users", "error", &err.user_message()),
    }
}

pub async fn login_page(
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> Response {
    if state.auth.is_logged_in() {
        return Redirect::to("/").into_response();
    }
    Html(pages::login(&notice)).into_response()
}

pub async fn login(State(state): State<AppState>, Form(credentials): Form<Credentials>) -> Redirect {
    if state.auth.is_logged_in() {
        return Redirect::to("/");
    }
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return notify("/login", "error", "Username and password are required");
    }

    match state.auth.login(&state.api, &credentials).await {
        Ok(_) => notify("/", "success", "Logged in"),
        Err(err) => {
            tracing::warn!(error = ?err, username = %credentials.username, "admin login failed");
            notify("/login", "error", &err.user_message())
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    match state.auth.logout(&state.api).await {
        Ok(()) => notify("/login", "success", "Logged out"),
        Err(err) => {
            tracing::error!(error = ?err, "failed to clear the stored admin session");
            notify("/", "error", "Something went wrong")
        }
    }
}
