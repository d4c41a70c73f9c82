//! In-process back office for integration tests.
//!
//! Wires the real handlers, access policy, cookie session and trace
//! middleware over in-memory repositories, an in-memory session store and a
//! temporary upload directory. Two sellers are seeded:
//!
//! - `admin@agencia.com` / `123` with role `ADMIN`
//! - `joao@agencia.com` / `456` with role `VENDEDOR`

use std::path::PathBuf;
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use agencia::Trace;
use agencia::domain::ports::{SessionStore, VendedorService};
use agencia::domain::{
    NewVendedor, RepositoryLoginService, RepositoryPacoteService, RepositoryVendedorService,
};
use agencia::inbound::http::assets::uploaded_files;
use agencia::inbound::http::authorization::{AccessPolicy, Authorize};
use agencia::inbound::http::routes::configure_api;
use agencia::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use agencia::inbound::http::state::HttpState;
use agencia::outbound::memory::{InMemoryPacoteRepository, InMemoryVendedorRepository};
use agencia::outbound::session::InMemorySessionStore;
use agencia::outbound::storage::LocalImageStorage;
use mockable::DefaultClock;
use serde_json::{Value, json};
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "admin@agencia.com";
pub const ADMIN_SENHA: &str = "123";
pub const VENDEDOR_EMAIL: &str = "joao@agencia.com";
pub const VENDEDOR_SENHA: &str = "456";

pub struct BackOffice {
    pub state: HttpState,
    pub uploads: TempDir,
    settings: SessionSettings,
}

/// Owned pieces the application is built from.
#[derive(Clone)]
pub struct Wiring {
    state: HttpState,
    settings: SessionSettings,
    upload_root: PathBuf,
}

impl BackOffice {
    pub async fn start() -> Self {
        let uploads = TempDir::new().expect("upload dir");
        let images = Arc::new(LocalImageStorage::open(uploads.path()).expect("image storage"));
        let vendedores = Arc::new(InMemoryVendedorRepository::new());
        let pacotes = Arc::new(InMemoryPacoteRepository::new());

        let vendedor_service = Arc::new(RepositoryVendedorService::new(Arc::clone(&vendedores)));
        vendedor_service
            .ensure_admin(ADMIN_EMAIL, ADMIN_SENHA)
            .await
            .expect("seed admin");
        vendedor_service
            .create(
                NewVendedor::try_from_parts(
                    Some("João"),
                    Some(VENDEDOR_EMAIL),
                    Some(VENDEDOR_SENHA),
                    None,
                )
                .expect("valid seller"),
            )
            .await
            .expect("seed seller");

        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));
        let state = HttpState::new(
            Arc::new(RepositoryLoginService::new(vendedores)),
            Arc::new(RepositoryPacoteService::new(pacotes, images)),
            vendedor_service,
            sessions,
        );
        let settings = SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };

        Self {
            state,
            uploads,
            settings,
        }
    }

    pub fn wiring(&self) -> Wiring {
        Wiring {
            state: self.state.clone(),
            settings: self.settings.clone(),
            upload_root: self.uploads.path().to_path_buf(),
        }
    }
}

/// Application with the same middleware order as the server binary.
pub fn back_office_app(
    wiring: Wiring,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let Wiring {
        state,
        settings,
        upload_root,
    } = wiring;
    App::new()
        .app_data(web::Data::new(state.clone()))
        .wrap(Authorize::new(
            Arc::clone(&state.sessions),
            AccessPolicy::default(),
        ))
        .wrap(settings.middleware())
        .wrap(Trace)
        .configure(configure_api)
        .service(uploaded_files(upload_root))
}

/// Request builder carrying the session cookie when given.
pub fn request(method: Method, uri: &str, cookie: Option<&Cookie<'static>>) -> test::TestRequest {
    let req = test::TestRequest::default().method(method).uri(uri);
    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

/// Send `req` and return the status with the JSON body, `Value::Null` when
/// the body is empty.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, json)
}

/// Log in and return the issued session cookie.
pub async fn login<S, B>(app: &S, email: &str, senha: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = request(Method::POST, "/api/login", None)
        .set_json(json!({ "email": email, "senha": senha }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::OK, "login as {email}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// JSON body without its per-request `traceId`.
pub fn without_trace_id(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.remove("traceId");
    }
    body
}

/// Single-field `multipart/form-data` body and its content-type header value.
pub fn multipart_body(
    field: &str,
    filename: Option<&str>,
    content_type: &str,
    content: &[u8],
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "back-office-boundary";
    let filename = filename
        .map(|name| format!("; filename=\"{name}\""))
        .unwrap_or_default();
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"{filename}\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
