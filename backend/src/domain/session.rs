//! Server-side session records.
//!
//! The browser only holds an opaque [`SessionId`]; everything the server knows
//! about the login lives in a [`SessionRecord`] kept by a session store.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{Principal, Role};

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier read back from the cookie.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login state retained between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(principal: Principal, now: DateTime<Utc>) -> Self {
        Self {
            email: principal.email,
            role: principal.role,
            created_at: now,
            last_seen_at: now,
        }
    }

    /// Whether the record has been idle for longer than `idle_timeout`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now - self.last_seen_at > idle_timeout
    }

    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal {
            email: self.email.clone(),
            role: self.role,
        }
    }
}
