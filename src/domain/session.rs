use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// How long a login stays valid.
pub const SESSION_LIFETIME: Duration = Duration::days(1);

/// The admin session as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry: OffsetDateTime,
}

impl Session {
    pub fn issue(token: String, now: OffsetDateTime) -> Self {
        Self {
            token,
            expiry: now + SESSION_LIFETIME,
        }
    }

    pub fn is_active_at(&self, now: OffsetDateTime) -> bool {
        !self.token.is_empty() && now < self.expiry
    }
}
