//! Login, logout and "who am I" handlers.
//!
//! ```text
//! POST /api/login   {"email":"admin@agencia.com","senha":"123"}
//! GET  /api/auth/me
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::domain::ports::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::{ApiResult, Error, LoginCredentials, LoginValidationError, Principal};
use crate::inbound::http::authorization::map_session_store_error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::vendedores::VendedorResponse;

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "admin@agencia.com")]
    pub email: String,
    #[schema(example = "123")]
    pub senha: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.senha)
    }
}

/// Blank fields fail exactly like a wrong password.
fn map_login_validation_error(err: LoginValidationError) -> Error {
    debug!(reason = %err, "login rejected before lookup");
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

/// Authenticate and open a server-side session.
///
/// Any session the browser already carried is revoked first.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = VendedorResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
                (status = 401, description = "Credenciais inválidas, blank fields included", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<VendedorResponse>> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    let vendedor = state.login.authenticate(&credentials).await?;

    if let Some(previous) = session.session_id()? {
        state
            .sessions
            .revoke(&previous)
            .await
            .map_err(map_session_store_error)?;
    }
    let id = state
        .sessions
        .create(Principal {
            email: vendedor.email.clone(),
            role: vendedor.role,
        })
        .await
        .map_err(map_session_store_error)?;
    session.start(&id)?;

    info!(vendedor_id = %vendedor.id, role = %vendedor.role, "session opened");
    Ok(web::Json(vendedor.into()))
}

/// Seller behind the current session.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current seller", body = VendedorResponse),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentVendedor"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<VendedorResponse>> {
    let vendedor = state.login.current(&principal).await?;
    Ok(web::Json(vendedor.into()))
}

/// End the session. Always answers 204, logged in or not.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session closed")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(id) = session.session_id()? {
        state
            .sessions
            .revoke(&id)
            .await
            .map_err(map_session_store_error)?;
        info!("session closed");
    }
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLoginService, MockPacoteService, MockVendedorService};
    use crate::domain::{ErrorCode, Role, StoredCredential, Vendedor, VendedorId};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use crate::outbound::session::InMemorySessionStore;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockable::DefaultClock;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn admin() -> Vendedor {
        Vendedor {
            id: VendedorId::new(1),
            nome: "Administrador".to_owned(),
            email: "admin@agencia.com".to_owned(),
            senha: StoredCredential::normalize("123"),
            role: Role::Admin,
        }
    }

    fn state(login_service: MockLoginService, sessions: Arc<InMemorySessionStore>) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(login_service),
            Arc::new(MockPacoteService::new()),
            Arc::new(MockVendedorService::new()),
            sessions,
        ))
    }

    fn accepting_login() -> MockLoginService {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .withf(|creds| creds.email() == "admin@agencia.com" && creds.senha() == "123")
            .returning(|_| Ok(admin()));
        service
    }

    #[actix_web::test]
    async fn login_opens_a_session_and_returns_the_public_seller() {
        let sessions = Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let app = test::init_service(
            App::new()
                .app_data(state(accepting_login(), Arc::clone(&sessions)))
                .wrap(test_session_middleware())
                .service(web::scope("/api").service(login)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "email": "admin@agencia.com", "senha": "123" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_some());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({ "id": 1, "nome": "Administrador", "email": "admin@agencia.com", "role": "ADMIN" })
        );
        assert_eq!(sessions.len().await, 1);
    }

    #[actix_web::test]
    async fn rejected_credentials_are_unauthorised() {
        let mut rejecting = MockLoginService::new();
        rejecting
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)));
        let sessions = Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let app = test::init_service(
            App::new()
                .app_data(state(rejecting, Arc::clone(&sessions)))
                .wrap(test_session_middleware())
                .service(web::scope("/api").service(login)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "email": "admin@agencia.com", "senha": "errada" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(sessions.len().await, 0);
    }

    #[rstest]
    #[case(json!({ "email": " ", "senha": "123" }))]
    #[case(json!({ "email": "admin@agencia.com" }))]
    #[case(json!({ "email": "admin@agencia.com", "senha": "" }))]
    #[actix_web::test]
    async fn blank_login_fields_are_invalid_credentials(#[case] body: Value) {
        let sessions = Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let app = test::init_service(
            App::new()
                .app_data(state(MockLoginService::new(), Arc::clone(&sessions)))
                .wrap(test_session_middleware())
                .service(web::scope("/api").service(login)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
        assert!(err.details().is_none());
        assert_eq!(sessions.len().await, 0);
    }

    #[actix_web::test]
    async fn logout_revokes_the_session() {
        let sessions = Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let app = test::init_service(
            App::new()
                .app_data(state(accepting_login(), Arc::clone(&sessions)))
                .wrap(test_session_middleware())
                .service(web::scope("/api").service(login).service(logout)),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "email": "admin@agencia.com", "senha": "123" }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res).expect("session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(sessions.len().await, 0);
    }

    #[actix_web::test]
    async fn logout_without_a_session_still_succeeds() {
        let sessions = Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let app = test::init_service(
            App::new()
                .app_data(state(MockLoginService::new(), sessions))
                .wrap(test_session_middleware())
                .service(web::scope("/api").service(logout)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::post().uri("/api/logout").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn me_requires_a_resolved_principal() {
        let sessions = Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let app = test::init_service(
            App::new()
                .app_data(state(MockLoginService::new(), sessions))
                .service(web::scope("/api").service(me)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/auth/me").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
