//! Route-level access control.
//!
//! [`Authorize`] resolves the session principal before dispatch and checks it
//! against an [`AccessPolicy`]: an ordered list of path-prefix rules where the
//! first match wins. Rejections short-circuit with the JSON error payload;
//! accepted principals are placed in the request extensions for the
//! [`Principal`] extractor.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use super::session::SessionContext;
use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{Error, Principal, Role};

const LOGIN_REQUIRED: &str = "login required";

/// What a route demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Open,
    Authenticated,
    AnyRole(&'static [Role]),
}

impl Requirement {
    /// `Unauthorized` without a principal, `Forbidden` with the wrong role.
    pub fn check(self, principal: Option<&Principal>) -> Result<(), Error> {
        match (self, principal) {
            (Self::Open, _) => Ok(()),
            (_, None) => Err(Error::unauthorized(LOGIN_REQUIRED)),
            (Self::Authenticated, Some(_)) => Ok(()),
            (Self::AnyRole(roles), Some(principal)) if principal.has_any_role(roles) => Ok(()),
            (Self::AnyRole(_), Some(_)) => Err(Error::forbidden("acesso negado")),
        }
    }
}

/// Ordered `(path prefix, requirement)` rules.
///
/// Prefixes match whole path segments: `/api/pacotes` covers
/// `/api/pacotes/3/imagem` but not `/api/pacotesx`.
///
/// # Examples
/// ```
/// use agencia::domain::Role;
/// use agencia::inbound::http::authorization::{AccessPolicy, Requirement};
///
/// let policy = AccessPolicy::default();
/// assert_eq!(policy.requirement_for("/api/login"), Requirement::Open);
/// assert_eq!(
///     policy.requirement_for("/api/vendedores/2"),
///     Requirement::AnyRole(&[Role::Admin])
/// );
/// assert_eq!(policy.requirement_for("/api/other"), Requirement::Authenticated);
/// assert_eq!(policy.requirement_for("/pacotes/2"), Requirement::Open);
/// ```
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<(String, Requirement)>,
    fallback: Requirement,
}

impl AccessPolicy {
    /// Empty policy applying `fallback` everywhere.
    pub fn new(fallback: Requirement) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule; earlier rules take precedence.
    #[must_use]
    pub fn rule(mut self, prefix: impl Into<String>, requirement: Requirement) -> Self {
        self.rules.push((prefix.into(), requirement));
        self
    }

    pub fn requirement_for(&self, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|(prefix, _)| covers(prefix, path))
            .map_or(self.fallback, |(_, requirement)| *requirement)
    }
}

impl Default for AccessPolicy {
    /// Rules for the back office API; anything outside `/api` stays open so
    /// uploaded files and the front end can be served.
    fn default() -> Self {
        Self::new(Requirement::Open)
            .rule("/api/login", Requirement::Open)
            .rule("/api/logout", Requirement::Open)
            .rule("/api/vendedores", Requirement::AnyRole(&[Role::Admin]))
            .rule(
                "/api/pacotes",
                Requirement::AnyRole(&[Role::Admin, Role::Vendedor]),
            )
            .rule("/api", Requirement::Authenticated)
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub(crate) fn map_session_store_error(error: SessionStoreError) -> Error {
    Error::service_unavailable(error.to_string())
}

/// Session-resolving access control middleware.
///
/// Must be wrapped inside the session middleware so the cookie is loaded.
#[derive(Clone)]
pub struct Authorize {
    sessions: Arc<dyn SessionStore>,
    policy: Rc<AccessPolicy>,
}

impl Authorize {
    pub fn new(sessions: Arc<dyn SessionStore>, policy: AccessPolicy) -> Self {
        Self {
            sessions,
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service: Rc::new(service),
            sessions: Arc::clone(&self.sessions),
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`Authorize`].
pub struct AuthorizeMiddleware<S> {
    service: Rc<S>,
    sessions: Arc<dyn SessionStore>,
    policy: Rc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let sessions = Arc::clone(&self.sessions);
        // The router matches on the percent-decoded path, so the policy must too.
        let requirement = self.policy.requirement_for(req.match_info().as_str());

        Box::pin(async move {
            if requirement == Requirement::Open {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            }

            let checked = match resolve_principal(&req, sessions.as_ref()).await {
                Ok(principal) => requirement.check(principal.as_ref()).map(|()| principal),
                Err(error) => Err(error),
            };
            match checked {
                Ok(principal) => {
                    if let Some(principal) = principal {
                        req.extensions_mut().insert(principal);
                    }
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    debug!(path = %req.path(), code = ?error.code(), "request rejected");
                    Ok(req.error_response(error).map_into_right_body())
                }
            }
        })
    }
}

/// Principal for the live session, touching it on the way.
///
/// A cookie pointing at an expired or revoked session is cleared.
async fn resolve_principal(
    req: &ServiceRequest,
    sessions: &dyn SessionStore,
) -> Result<Option<Principal>, Error> {
    let session = SessionContext::from_service_request(req);
    let Some(id) = session.session_id()? else {
        return Ok(None);
    };
    let Some(record) = sessions
        .resolve(&id)
        .await
        .map_err(map_session_store_error)?
    else {
        session.clear();
        return Ok(None);
    };
    sessions.touch(&id).await.map_err(map_session_store_error)?;
    Ok(Some(record.principal()))
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .cloned()
                .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED)),
        )
    }
}
