//! Port for server-side session state.
//!
//! The session cookie only carries a [`SessionId`]; adapters map it to the
//! [`SessionRecord`] established at login. Expired records must resolve to
//! `None`.

use async_trait::async_trait;

use crate::domain::{Principal, SessionId, SessionRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The backing store could not be reached.
        Unavailable { message: String } => "session store unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a new session for `principal`.
    async fn create(&self, principal: Principal) -> Result<SessionId, SessionStoreError>;

    /// Look up a live session.
    async fn resolve(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Record activity on a live session, extending its idle window.
    async fn touch(&self, id: &SessionId) -> Result<(), SessionStoreError>;

    /// Forget a session. Unknown ids are ignored.
    async fn revoke(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}
