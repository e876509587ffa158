use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::app::auth::{AuthContext, Credentials};
use crate::domain::chat::Message;
use crate::domain::entity::Entity;
use crate::domain::metrics::{
    Analytics, ContentDistribution, DashboardStats, Growth, MessageAnalytics, Period,
    ReportAnalytics, ReportsOverview, UserStats,
};
use crate::domain::moderation::{Report, ReportKind, ReportStatus};
use crate::domain::user::ManagedUser;

/// Text shown when a failure carries nothing better.
pub const GENERIC_ERROR: &str = "Something went wrong";

const API_PREFIX: &str = "api/v1/admin/";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("admin api answered {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("admin api rejected the request: {message}")]
    Rejected { message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response carried no data")]
    Empty,
}

impl ApiError {
    /// The message an admin sees: the server's own words when it sent any.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected { message } => message.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// The parts of the admin API that read or change lists held in the dashboard.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<Report>, ApiError>;

    /// `Ok(None)` when the entity no longer exists.
    async fn get_entity(
        &self,
        entity_id: &str,
        kind: ReportKind,
    ) -> Result<Option<Entity>, ApiError>;

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>, ApiError>;

    /// Returns the status the server acknowledged.
    async fn update_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<ReportStatus, ApiError>;

    async fn delete_report(&self, report_id: &str) -> Result<(), ApiError>;

    /// Returns the session token.
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn list_users(&self) -> Result<Vec<ManagedUser>, ApiError>;

    /// Deletes every account whose email was never verified.
    async fn remove_unverified_users(&self) -> Result<(), ApiError>;
}

/// Every admin API response is wrapped like this.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    auth: AuthContext,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, auth: AuthContext) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url).context("invalid API_BASE_URL")?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("API_BASE_URL must be an http(s) origin"));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let base = base.join(API_PREFIX)?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ciel-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base, auth })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(segments));
        match self.auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and unwraps the envelope, returning the raw `data`.
    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!(%method, %path, "admin api request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        let envelope = serde_json::from_slice::<Envelope>(&body);

        if !status.is_success() {
            let message = envelope.ok().and_then(|envelope| envelope.message);
            tracing::warn!(%method, %path, %status, message = ?message, "admin api error");
            return Err(ApiError::Status { status, message });
        }

        let envelope = envelope?;
        if !envelope.success {
            let message = envelope.message.unwrap_or_else(|| GENERIC_ERROR.to_string());
            tracing::warn!(%method, %path, %message, "admin api rejected request");
            return Err(ApiError::Rejected { message });
        }

        Ok(envelope.data)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let data = self.send(builder).await?;
        if data.is_null() {
            return Err(ApiError::Empty);
        }
        Ok(serde_json::from_value(data)?)
    }

    /// Like [`ApiClient::fetch`], but a list without data is an empty list.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<T>, ApiError> {
        let data = self.send(builder).await?;
        if data.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(data)?)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.fetch(self.request(Method::GET, &["dashboard"])).await
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.fetch(self.request(Method::GET, &["user-stats"])).await
    }

    pub async fn reports_overview(&self) -> Result<ReportsOverview, ApiError> {
        self.fetch(self.request(Method::GET, &["reports-overview"])).await
    }

    pub async fn report_analytics(&self, period: Period) -> Result<ReportAnalytics, ApiError> {
        self.fetch(
            self.request(Method::GET, &["report-analytics"])
                .query(&[("period", period.as_str())]),
        )
        .await
    }

    pub async fn growth(&self, period: Period) -> Result<Growth, ApiError> {
        self.fetch(
            self.request(Method::GET, &["growth"])
                .query(&[("query", period.as_str())]),
        )
        .await
    }

    pub async fn analytics(&self) -> Result<Analytics, ApiError> {
        self.fetch(self.request(Method::GET, &["analytics"])).await
    }

    pub async fn message_analytics(&self) -> Result<MessageAnalytics, ApiError> {
        self.fetch(self.request(Method::GET, &["message-analytics"])).await
    }

    pub async fn content_distribution(&self) -> Result<ContentDistribution, ApiError> {
        self.fetch(self.request(Method::GET, &["content-distribution"])).await
    }
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.fetch_list(self.request(Method::GET, &["reports"])).await
    }

    async fn get_entity(
        &self,
        entity_id: &str,
        kind: ReportKind,
    ) -> Result<Option<Entity>, ApiError> {
        let data = self
            .send(
                self.request(Method::GET, &["entity"])
                    .query(&[("entityId", entity_id), ("kind", kind.as_str())]),
            )
            .await?;

        if data.is_null() {
            return Ok(None);
        }
        Ok(Some(Entity::decode(kind, data)?))
    }

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>, ApiError> {
        self.fetch_list(self.request(Method::GET, &["messages", chat_id]))
            .await
    }

    async fn update_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<ReportStatus, ApiError> {
        #[derive(Deserialize)]
        struct Ack {
            status: Option<ReportStatus>,
        }

        let data = self
            .send(
                self.request(Method::PUT, &["reports", report_id])
                    .json(&json!({ "status": status })),
            )
            .await?;

        // Either the full report or a `{status}` subset; an empty ack means the
        // requested status was taken as-is.
        let acknowledged = serde_json::from_value::<Ack>(data)
            .ok()
            .and_then(|ack| ack.status)
            .unwrap_or(status);
        Ok(acknowledged)
    }

    async fn delete_report(&self, report_id: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &["reports", report_id]))
            .await
            .map(|_| ())
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct LoginData {
            #[serde(default)]
            token: String,
        }

        let data: LoginData = self
            .fetch(self.request(Method::POST, &["login"]).json(credentials))
            .await?;
        Ok(data.token)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send(self.request(Method::GET, &["logout"]))
            .await
            .map(|_| ())
    }

    async fn list_users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        self.fetch_list(self.request(Method::GET, &["users"])).await
    }

    async fn remove_unverified_users(&self) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &["unverified-users"]))
            .await
            .map(|_| ())
    }
}
