//! In-memory stand-ins for the admin API used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::app::auth::{AuthContext, Credentials};
use crate::domain::chat::{Message, MessageKind};
use crate::domain::entity::Entity;
use crate::domain::moderation::{Report, ReportKind, ReportStatus};
use crate::domain::session::Session;
use crate::domain::user::{BasicUser, LoginType, ManagedUser};
use crate::infra::api::{AdminApi, ApiError};
use crate::infra::session_store::MemorySessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListReports,
    GetEntity(String, ReportKind),
    ListMessages(String),
    UpdateStatus(String, ReportStatus),
    DeleteReport(String),
    Login,
    Logout,
    ListUsers,
    RemoveUnverifiedUsers,
}

#[derive(Default)]
pub struct FakeApi {
    reports: Mutex<Vec<Report>>,
    users: Mutex<Vec<ManagedUser>>,
    entities: Mutex<HashMap<String, Entity>>,
    messages: Mutex<HashMap<String, Vec<Message>>>,
    failure: Mutex<Option<String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        let api = Self::default();
        *api.reports.lock().unwrap() = reports;
        api
    }

    pub fn with_users(users: Vec<ManagedUser>) -> Self {
        let api = Self::default();
        *api.users.lock().unwrap() = users;
        api
    }

    pub fn set_entity(&self, entity_id: &str, entity: Entity) {
        self.entities
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), entity);
    }

    pub fn set_messages(&self, chat_id: &str, messages: Vec<Message>) {
        self.messages
            .lock()
            .unwrap()
            .insert(chat_id.to_string(), messages);
    }

    /// Every later call fails with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(ApiError::Rejected { message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.record(Call::ListReports)?;
        Ok(self.reports.lock().unwrap().clone())
    }

    async fn get_entity(
        &self,
        entity_id: &str,
        kind: ReportKind,
    ) -> Result<Option<Entity>, ApiError> {
        self.record(Call::GetEntity(entity_id.to_string(), kind))?;
        Ok(self.entities.lock().unwrap().get(entity_id).cloned())
    }

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>, ApiError> {
        self.record(Call::ListMessages(chat_id.to_string()))?;
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(chat_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<ReportStatus, ApiError> {
        self.record(Call::UpdateStatus(report_id.to_string(), status))?;
        Ok(status)
    }

    async fn delete_report(&self, report_id: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteReport(report_id.to_string()))?;
        self.reports
            .lock()
            .unwrap()
            .retain(|report| report.id != report_id);
        Ok(())
    }

    async fn login(&self, _credentials: &Credentials) -> Result<String, ApiError> {
        self.record(Call::Login)?;
        Ok("fake-token".to_string())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(Call::Logout)
    }

    async fn list_users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        self.record(Call::ListUsers)?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn remove_unverified_users(&self) -> Result<(), ApiError> {
        self.record(Call::RemoveUnverifiedUsers)?;
        self.users
            .lock()
            .unwrap()
            .retain(|user| user.is_mail_verified);
        Ok(())
    }
}

pub fn managed_user(id: &str, email: &str, verified: bool, login_type: LoginType) -> ManagedUser {
    ManagedUser {
        id: id.to_string(),
        username: id.to_string(),
        email: email.to_string(),
        avatar: String::new(),
        created_at: None,
        is_mail_verified: verified,
        login_type,
        sessions: 0,
    }
}

pub fn user(id: &str) -> BasicUser {
    BasicUser {
        id: id.to_string(),
        avatar: String::new(),
        username: format!("user_{id}"),
        full_name: String::new(),
        email: format!("{id}@ciel.test"),
    }
}

pub fn report(id: &str, kind: ReportKind, status: ReportStatus) -> Report {
    Report {
        id: id.to_string(),
        entity_id: format!("entity-{id}"),
        kind,
        title: "Spam".to_string(),
        description: String::new(),
        images: Vec::new(),
        user: user("reporter"),
        status,
        created_at: None,
    }
}

pub fn message(id: &str, sender_id: &str, created_at: &str) -> Message {
    Message {
        id: id.to_string(),
        sender: Some(user(sender_id)),
        kind: MessageKind::Message,
        content: format!("message {id}"),
        post: None,
        reacts: Vec::new(),
        created_at: Some(OffsetDateTime::parse(created_at, &Rfc3339).unwrap()),
    }
}

pub fn logged_in() -> AuthContext {
    let session = Session::issue("test-token".to_string(), OffsetDateTime::now_utc());
    AuthContext::init(MemorySessionStore::with_session(session))
}
