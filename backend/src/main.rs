//! Back office entry point: loads configuration, prepares storage and the
//! database, then serves the API, uploaded images and the front end.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use agencia::config::AppSettings;
use agencia::inbound::http::health::HealthState;
use agencia::inbound::http::session_config::{BuildMode, session_settings_from_env};
use agencia::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{BootstrapAdmin, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    let mut config = ServerConfig::new(session, bind_addr, settings.upload_dir().to_path_buf())
        .with_static_dir(settings.static_dir().to_path_buf())
        .with_max_upload_bytes(settings.max_upload_bytes());

    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .wrap_err("database migrations failed")?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }
    if let Some((email, senha)) = settings.bootstrap_admin() {
        config = config.with_bootstrap_admin(BootstrapAdmin::new(email, senha));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    health_state.mark_ready();
    info!("back office ready");
    server.await.wrap_err("server terminated with an error")
}
