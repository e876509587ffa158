use axum::response::Redirect;
use axum::Router;

use crate::AppState;

mod auth;
mod error;
mod handlers;
mod routes;

pub use auth::AdminSession;
pub use error::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health())
        .merge(routes::dashboard())
        .merge(routes::analytics())
        .merge(routes::reports())
        .merge(routes::users())
        .merge(routes::auth())
        .with_state(state)
}

/// Redirects to `path` with a notice in the query string.
pub(crate) fn notify(path: &str, level: &str, message: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(level, message)
        .finish();
    Redirect::to(&format!("{path}?{query}"))
}
