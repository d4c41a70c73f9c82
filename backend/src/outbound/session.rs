//! In-process [`SessionStore`] with idle expiry.
//!
//! Records are evicted lazily: a lookup that finds an expired record removes
//! it and reports the session as absent, and every new login sweeps all
//! expired records so abandoned sessions do not accumulate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{Principal, SessionId, SessionRecord};

/// Idle minutes after which a session stops resolving.
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: i64 = 120;

pub struct InMemorySessionStore {
    records: RwLock<HashMap<SessionId, SessionRecord>>,
    clock: Arc<dyn Clock>,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_idle_timeout(clock, Duration::minutes(DEFAULT_IDLE_TIMEOUT_MINUTES))
    }

    pub fn with_idle_timeout(clock: Arc<dyn Clock>, idle_timeout: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
            idle_timeout,
        }
    }

    /// Number of records held, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, principal: Principal) -> Result<SessionId, SessionStoreError> {
        let now = self.clock.utc();
        let id = SessionId::random();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now, self.idle_timeout));
        let swept = before - records.len();
        if swept > 0 {
            debug!(swept, "expired sessions swept");
        }
        records.insert(id.clone(), SessionRecord::new(principal, now));
        Ok(id)
    }

    async fn resolve(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let now = self.clock.utc();
        {
            let records = self.records.read().await;
            match records.get(id) {
                None => return Ok(None),
                Some(record) if !record.is_expired(now, self.idle_timeout) => {
                    return Ok(Some(record.clone()));
                }
                Some(_) => {}
            }
        }
        let mut records = self.records.write().await;
        if records
            .get(id)
            .is_some_and(|record| record.is_expired(now, self.idle_timeout))
        {
            records.remove(id);
            debug!("expired session evicted");
        }
        Ok(None)
    }

    async fn touch(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let now = self.clock.utc();
        if let Some(record) = self.records.write().await.get_mut(id) {
            record.last_seen_at = now;
        }
        Ok(())
    }

    async fn revoke(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
