//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use agencia::inbound::http::session_config::SessionSettings;
use agencia::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;
use agencia::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Administrator created at startup when no seller has its email.
pub struct BootstrapAdmin {
    pub(crate) email: String,
    pub(crate) senha: Zeroizing<String>,
}

impl BootstrapAdmin {
    pub fn new(email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            senha: Zeroizing::new(senha.into()),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_dir: PathBuf,
    pub(crate) static_dir: Option<PathBuf>,
    pub(crate) max_upload_bytes: usize,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, upload_dir: PathBuf) -> Self {
        Self {
            session,
            bind_addr,
            upload_dir,
            static_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            db_pool: None,
            bootstrap_admin: None,
        }
    }

    /// Attach a database pool; without one the in-memory repositories are
    /// used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Serve a front-end bundle from `dir` for non-API paths.
    #[must_use]
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    #[must_use]
    pub fn with_bootstrap_admin(mut self, admin: BootstrapAdmin) -> Self {
        self.bootstrap_admin = Some(admin);
        self
    }
}
