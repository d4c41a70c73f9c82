//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{BootstrapAdmin, ServerConfig};

use state_builders::build_http_state;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use agencia::Trace;
#[cfg(debug_assertions)]
use agencia::doc::ApiDoc;
use agencia::domain::ports::SessionStore;
use agencia::inbound::http::assets::{front_end, uploaded_files};
use agencia::inbound::http::authorization::{AccessPolicy, Authorize};
use agencia::inbound::http::health::{HealthState, live, ready};
use agencia::inbound::http::routes::configure_api;
use agencia::inbound::http::session_config::SessionSettings;
use agencia::inbound::http::session_config::fingerprint::key_fingerprint;
use agencia::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    sessions: Arc<dyn SessionStore>,
    session: SessionSettings,
    upload_dir: PathBuf,
    static_dir: Option<PathBuf>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        sessions,
        session,
        upload_dir,
        static_dir,
    } = deps;

    // Trace is registered last so it wraps the session and access checks.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Authorize::new(sessions, AccessPolicy::default()))
        .wrap(session.middleware())
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live)
        .service(uploaded_files(upload_dir));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    match static_dir.as_deref().and_then(front_end) {
        Some(files) => app.service(files),
        None => app,
    }
}

/// Construct an Actix HTTP server from the configuration.
///
/// The returned [`Server`] must be awaited to drive the listener; readiness
/// is left to the caller.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the state, binding the socket
/// or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let state = build_http_state(&config).await?;
    let sessions = Arc::clone(&state.sessions);
    let http_state = web::Data::new(state);

    let ServerConfig {
        session,
        bind_addr,
        upload_dir,
        static_dir,
        ..
    } = config;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let deps = AppDependencies {
        health_state,
        http_state,
        sessions,
        session,
        upload_dir,
        static_dir,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "listening");
    Ok(server)
}
