use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::session::Session;
use crate::infra::api::{AdminApi, ApiError};
use crate::infra::session_store::SessionStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Process-wide admin session.
///
/// The logged-in flag is computed once, when the context is initialized from
/// the stored session. It is not re-checked against the expiry afterwards:
/// a session that lapses while the process runs stays active until the next
/// restart or an explicit logout. Only [`AuthContext::login`] and
/// [`AuthContext::logout`] change it.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<Inner>,
}

struct Inner {
    store: Box<dyn SessionStore>,
    session: RwLock<Option<Session>>,
}

impl AuthContext {
    pub fn init(store: impl SessionStore + 'static) -> Self {
        Self::init_at(store, OffsetDateTime::now_utc())
    }

    pub fn init_at(store: impl SessionStore + 'static, now: OffsetDateTime) -> Self {
        let session = match store.load() {
            Ok(Some(session)) if session.is_active_at(now) => {
                tracing::info!(expiry = %session.expiry, "restored admin session");
                Some(session)
            }
            Ok(Some(session)) => {
                tracing::info!(expiry = %session.expiry, "stored admin session has expired");
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = ?err, "ignoring unreadable admin session");
                None
            }
        };

        Self {
            inner: Arc::new(Inner {
                store: Box::new(store),
                session: RwLock::new(session),
            }),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_some()
    }

    /// Bearer token of the active session.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|session| session.token.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.read().clone()
    }

    pub async fn login<A>(&self, api: &A, credentials: &Credentials) -> Result<Session, ApiError>
    where
        A: AdminApi + ?Sized,
    {
        let token = api.login(credentials).await?;
        if token.is_empty() {
            return Err(ApiError::Rejected {
                message: "login response did not include a token".into(),
            });
        }

        let session = Session::issue(token, OffsetDateTime::now_utc());
        if let Err(err) = self.inner.store.save(&session) {
            tracing::warn!(error = ?err, "failed to persist admin session");
        }
        *self.write() = Some(session.clone());

        tracing::info!(username = %credentials.username, expiry = %session.expiry, "admin logged in");
        Ok(session)
    }

    /// Ends the session locally even when the API call fails.
    pub async fn logout<A>(&self, api: &A) -> anyhow::Result<()>
    where
        A: AdminApi + ?Sized,
    {
        if let Err(err) = api.logout().await {
            tracing::warn!(error = ?err, "admin api logout failed");
        }

        *self.write() = None;
        self.inner.store.clear()?;
        tracing::info!("admin logged out");
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
