use axum::{routing::get, routing::post, Router};

use crate::AppState;
use crate::http::handlers;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn dashboard() -> Router<AppState> {
    Router::new().route("/", get(handlers::dashboard))
}

pub fn analytics() -> Router<AppState> {
    Router::new().route("/analytics", get(handlers::analytics))
}

pub fn reports() -> Router<AppState> {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/:id", get(handlers::view_report))
        .route("/reports/:id/status", post(handlers::update_report_status))
        .route(
            "/reports/:id/delete",
            get(handlers::confirm_delete_report).post(handlers::delete_report),
        )
}

pub fn users() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route(
            "/users/unverified/delete",
            post(handlers::remove_unverified_users),
        )
}

pub fn auth() -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", post(handlers::logout))
}
