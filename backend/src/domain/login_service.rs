//! Credential login backed by the seller repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{INVALID_CREDENTIALS_MESSAGE, LoginService, VendedorRepository};
use super::vendedor_service::map_vendedor_repository_error;
use super::{Error, LoginCredentials, Principal, Vendedor};

/// [`LoginService`] that looks sellers up by email and verifies their stored
/// credential.
pub struct RepositoryLoginService<V> {
    vendedores: Arc<V>,
}

impl<V> RepositoryLoginService<V> {
    pub fn new(vendedores: Arc<V>) -> Self {
        Self { vendedores }
    }
}

#[async_trait]
impl<V> LoginService for RepositoryLoginService<V>
where
    V: VendedorRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Vendedor, Error> {
        let found = self
            .vendedores
            .find_by_email(credentials.email())
            .await
            .map_err(map_vendedor_repository_error)?;

        match found {
            Some(vendedor) if vendedor.senha.verify(credentials.senha()) => {
                info!(email = %vendedor.email, role = %vendedor.role, "login succeeded");
                Ok(vendedor)
            }
            Some(_) => {
                warn!(email = %credentials.email(), "login rejected: credential mismatch");
                Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
            }
            None => {
                warn!(email = %credentials.email(), "login rejected: unknown email");
                Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
            }
        }
    }

    async fn current(&self, principal: &Principal) -> Result<Vendedor, Error> {
        self.vendedores
            .find_by_email(&principal.email)
            .await
            .map_err(map_vendedor_repository_error)?
            .ok_or_else(|| Error::unauthorized("sessão sem vendedor associado"))
    }
}
