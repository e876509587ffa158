use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;

use crate::app::triage::LOGIN_REQUIRED;
use crate::http::notify;
use crate::AppState;

/// Present only while an admin session is active. Handlers taking it are
/// never reached without one: the request is sent to the login page with a
/// warning instead.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.auth.is_logged_in() {
            return Ok(AdminSession);
        }

        tracing::info!(path = %parts.uri.path(), "mutation refused without an admin session");
        Err(login_redirect())
    }
}

pub fn login_redirect() -> Redirect {
    notify("/login", "warning", LOGIN_REQUIRED)
}
