use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::infra::api::ApiError;
use crate::views::pages;

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            return Self::not_found(err.user_message());
        }
        tracing::error!(error = ?err, "admin api call failed");
        Self::bad_gateway(err.user_message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let title = self.status.canonical_reason().unwrap_or("Error");
        let body = Html(pages::error(title, &self.message, false));
        (self.status, body).into_response()
    }
}
