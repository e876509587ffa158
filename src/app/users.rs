use std::time::Duration;

use crate::app::auth::AuthContext;
use crate::app::triage::TriageError;
use crate::domain::user::{LoginType, ManagedUser};
use crate::infra::api::{AdminApi, ApiError};
use crate::infra::cache::ListCache;

/// Users whose username or email contains `query`, ignoring case. An empty
/// query matches everyone.
pub fn filter_users<'a>(users: &'a [ManagedUser], query: &str) -> Vec<&'a ManagedUser> {
    let query = query.trim().to_lowercase();
    users
        .iter()
        .filter(|user| {
            query.is_empty()
                || user.username.to_lowercase().contains(&query)
                || user.email.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn unverified_count(users: &[ManagedUser]) -> usize {
    users.iter().filter(|user| !user.is_mail_verified).count()
}

/// Keeps verified accounts only.
pub fn verified_only(users: Vec<ManagedUser>) -> Vec<ManagedUser> {
    users.into_iter().filter(|user| user.is_mail_verified).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginDistribution {
    pub local: usize,
    pub google: usize,
}

impl LoginDistribution {
    pub fn total(&self) -> usize {
        self.local + self.google
    }
}

pub fn login_distribution(users: &[ManagedUser]) -> LoginDistribution {
    users
        .iter()
        .fold(LoginDistribution::default(), |mut acc, user| {
            match user.login_type {
                LoginType::Local => acc.local += 1,
                LoginType::Google => acc.google += 1,
                LoginType::Other => {}
            }
            acc
        })
}

#[derive(Clone)]
pub struct UserService {
    list: ListCache<ManagedUser>,
}

impl UserService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            list: ListCache::new(ttl),
        }
    }

    pub async fn load<A>(&self, api: &A) -> Result<Vec<ManagedUser>, ApiError>
    where
        A: AdminApi + ?Sized,
    {
        self.list
            .get_or_fetch(|| async {
                let users = api.list_users().await?;
                tracing::debug!(count = users.len(), "fetched users");
                Ok::<_, ApiError>(users)
            })
            .await
    }

    /// Deletes every unverified account and drops them from the cached list.
    pub async fn remove_unverified<A>(&self, api: &A, auth: &AuthContext) -> Result<(), TriageError>
    where
        A: AdminApi + ?Sized,
    {
        if !auth.is_logged_in() {
            return Err(TriageError::LoginRequired);
        }

        api.remove_unverified_users().await.map_err(|err| {
            tracing::error!(error = ?err, "failed to remove unverified users");
            TriageError::Api(err)
        })?;

        self.list.patch(verified_only).await;
        tracing::info!("unverified users removed");
        Ok(())
    }
}
