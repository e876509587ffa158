//! The report detail dialog: entity resolution and status mutations.

use crate::app::auth::AuthContext;
use crate::app::preview::Preview;
use crate::app::reports::{self, ReportCache};
use crate::domain::moderation::{Report, ReportKind, ReportStatus};
use crate::infra::api::{AdminApi, ApiError};

/// Shown when an unauthenticated admin tries to mutate.
pub const LOGIN_REQUIRED: &str = "Please login to continue";

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("login required")]
    LoginRequired,
    #[error("another change to this report is still running")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TriageError {
    pub fn user_message(&self) -> String {
        match self {
            Self::LoginRequired => LOGIN_REQUIRED.to_string(),
            Self::Busy => "Please wait for the previous change to finish".to_string(),
            Self::Api(err) => err.user_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogState {
    Closed,
    Loading,
    Loaded(Preview),
    /// The entity no longer exists.
    Empty,
    Failed(String),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone)]
pub struct ReportDialog {
    pub report: Report,
    pub state: DialogState,
    /// Last status confirmed by the server.
    pub status: ReportStatus,
}

impl ReportDialog {
    pub fn new(report: Report) -> Self {
        let status = report.status;
        Self {
            report,
            state: DialogState::Closed,
            status,
        }
    }

    /// Resolves the reported entity. Calling it on an open dialog does nothing.
    pub async fn open<A>(&mut self, api: &A)
    where
        A: AdminApi + ?Sized,
    {
        if self.state.is_open() {
            return;
        }

        let kind = self.report.kind;
        match kind {
            ReportKind::Unknown => {
                tracing::warn!(report_id = %self.report.id, "report has an unrecognized kind");
                self.state = DialogState::Failed("Unsupported report type".to_string());
            }
            ReportKind::Problem | ReportKind::Story | ReportKind::Confession => {
                self.state = DialogState::Loaded(Preview::Placeholder(kind));
            }
            ReportKind::Post | ReportKind::Comment | ReportKind::User | ReportKind::Chat => {
                self.state = DialogState::Loading;
                let resolved = self.resolve(api).await;
                self.state = resolved;
            }
        }
    }

    async fn resolve<A>(&self, api: &A) -> DialogState
    where
        A: AdminApi + ?Sized,
    {
        let report = &self.report;
        match api.get_entity(&report.entity_id, report.kind).await {
            Ok(Some(entity)) => {
                let mut preview = Preview::from_entity(entity, &report.user.id);
                preview.mount(api).await;
                DialogState::Loaded(preview)
            }
            Ok(None) => DialogState::Empty,
            Err(err) if err.is_not_found() => DialogState::Empty,
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    report_id = %report.id,
                    kind = report.kind.as_str(),
                    "failed to load reported entity"
                );
                DialogState::Failed(err.user_message())
            }
        }
    }

    pub fn close(&mut self) {
        self.state = DialogState::Closed;
    }

    /// Status and delete controls accept input.
    pub fn controls_enabled(&self, auth: &AuthContext, cache: &ReportCache) -> bool {
        auth.is_logged_in() && !cache.is_mutating(&self.report.id)
    }

    /// Sends one status change. The dialog and the cache only move once the
    /// server has acknowledged it.
    pub async fn change_status<A>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        cache: &ReportCache,
        status: ReportStatus,
    ) -> Result<ReportStatus, TriageError>
    where
        A: AdminApi + ?Sized,
    {
        if !auth.is_logged_in() {
            return Err(TriageError::LoginRequired);
        }
        let id = self.report.id.clone();
        let _guard = cache.begin_mutation(&id).ok_or(TriageError::Busy)?;

        let acknowledged = api
            .update_report_status(&id, status)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, report_id = %id, status = status.as_str(), "failed to update report status");
                TriageError::Api(err)
            })?;

        cache.set_status(&id, acknowledged).await;
        self.status = acknowledged;
        self.report.status = acknowledged;
        tracing::info!(report_id = %id, status = acknowledged.as_str(), "report status updated");
        Ok(acknowledged)
    }

    pub async fn delete<A>(
        &mut self,
        api: &A,
        auth: &AuthContext,
        cache: &ReportCache,
    ) -> Result<(), TriageError>
    where
        A: AdminApi + ?Sized,
    {
        reports::delete_report(api, auth, cache, &self.report.id).await?;
        self.close();
        Ok(())
    }
}
