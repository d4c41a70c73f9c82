//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against in-memory adapters or mocks.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PacoteService, SessionStore, VendedorService};

/// Upload size accepted when nothing else is configured (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub pacotes: Arc<dyn PacoteService>,
    pub vendedores: Arc<dyn VendedorService>,
    pub sessions: Arc<dyn SessionStore>,
    pub max_upload_bytes: usize,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        pacotes: Arc<dyn PacoteService>,
        vendedores: Arc<dyn VendedorService>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            login,
            pacotes,
            vendedores,
            sessions,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
