//! Cookie-side half of the session: the opaque [`SessionId`].
//!
//! The cookie never holds identity or role; those live in the
//! [`SessionStore`](crate::domain::ports::SessionStore) record the id points at.

use actix_session::{Session, SessionExt};
use actix_web::dev::ServiceRequest;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionId};

pub(crate) const SESSION_ID_KEY: &str = "sid";

/// Handler-facing wrapper over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Session attached to a request still inside the middleware chain.
    pub fn from_service_request(req: &ServiceRequest) -> Self {
        Self(req.get_session())
    }

    /// Store `id` under a renewed cookie so a pre-login cookie is never reused.
    pub fn start(&self, id: &SessionId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_ID_KEY, id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Session id carried by the cookie. Malformed values read as absent.
    pub fn session_id(&self) -> Result<Option<SessionId>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match SessionId::parse(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid session id in cookie");
                None
            }
        }))
    }

    /// Drop the cookie entirely.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
