//! Builders for the HTTP state: repositories, services and session store.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use agencia::domain::ports::{
    ImageStorage, LoginService, PacoteRepository, PacoteService, SessionStore,
    VendedorRepository, VendedorService,
};
use agencia::domain::{RepositoryLoginService, RepositoryPacoteService, RepositoryVendedorService};
use agencia::inbound::http::state::HttpState;
use agencia::outbound::memory::{InMemoryPacoteRepository, InMemoryVendedorRepository};
use agencia::outbound::persistence::{DieselPacoteRepository, DieselVendedorRepository};
use agencia::outbound::session::InMemorySessionStore;
use agencia::outbound::storage::LocalImageStorage;

use super::{BootstrapAdmin, ServerConfig};

struct Services {
    login: Arc<dyn LoginService>,
    pacotes: Arc<dyn PacoteService>,
    vendedores: Arc<dyn VendedorService>,
}

/// Wire services over one repository family and create the bootstrap
/// administrator when configured.
async fn build_services<V, P, S>(
    vendedores: Arc<V>,
    pacotes: Arc<P>,
    images: Arc<S>,
    admin: Option<&BootstrapAdmin>,
) -> io::Result<Services>
where
    V: VendedorRepository + 'static,
    P: PacoteRepository + 'static,
    S: ImageStorage + 'static,
{
    let vendedor_service = Arc::new(RepositoryVendedorService::new(Arc::clone(&vendedores)));
    if let Some(admin) = admin {
        let created = vendedor_service
            .ensure_admin(&admin.email, &admin.senha)
            .await
            .map_err(|err| io::Error::other(format!("bootstrap admin failed: {err}")))?;
        if !created {
            info!(email = %admin.email, "bootstrap admin already present");
        }
    }

    Ok(Services {
        login: Arc::new(RepositoryLoginService::new(vendedores)),
        pacotes: Arc::new(RepositoryPacoteService::new(pacotes, images)),
        vendedores: vendedor_service,
    })
}

/// Build the shared HTTP state.
///
/// Uses the Diesel repositories when a pool is configured and the in-memory
/// ones otherwise. Sessions always live in process.
///
/// # Errors
/// Fails when the upload directory cannot be opened or the bootstrap
/// administrator cannot be created.
pub(crate) async fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let images = Arc::new(LocalImageStorage::open(&config.upload_dir)?);
    info!(dir = %images.root().display(), "image storage ready");

    let admin = config.bootstrap_admin.as_ref();
    let services = match &config.db_pool {
        Some(pool) => {
            build_services(
                Arc::new(DieselVendedorRepository::new(pool.clone())),
                Arc::new(DieselPacoteRepository::new(pool.clone())),
                images,
                admin,
            )
            .await?
        }
        None => {
            warn!("no database configured; data lives in memory until restart");
            build_services(
                Arc::new(InMemoryVendedorRepository::new()),
                Arc::new(InMemoryPacoteRepository::new()),
                images,
                admin,
            )
            .await?
        }
    };

    let sessions: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(Arc::new(DefaultClock)));

    Ok(
        HttpState::new(services.login, services.pacotes, services.vendedores, sessions)
            .with_max_upload_bytes(config.max_upload_bytes),
    )
}
