//! Seller management backed by the seller repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use super::ports::{VendedorRepository, VendedorRepositoryError, VendedorService};
use super::{Error, NewVendedor, Role, Vendedor, VendedorId, VendedorUpdate};

pub(crate) fn map_vendedor_repository_error(err: VendedorRepositoryError) -> Error {
    match err {
        VendedorRepositoryError::Connection { message } => {
            error!(%message, "vendedor repository unavailable");
            Error::service_unavailable("repositório de vendedores indisponível")
        }
        VendedorRepositoryError::Query { message } => {
            error!(%message, "vendedor repository query failed");
            Error::internal(format!("vendedor repository error: {message}"))
        }
        VendedorRepositoryError::DuplicateEmail { email } => Error::conflict("email já cadastrado")
            .with_details(json!({ "field": "email", "code": "duplicate_email", "value": email })),
    }
}

fn not_found(id: VendedorId) -> Error {
    Error::not_found(format!("vendedor {id} não encontrado"))
}

/// [`VendedorService`] over a [`VendedorRepository`].
pub struct RepositoryVendedorService<V> {
    vendedores: Arc<V>,
}

impl<V> RepositoryVendedorService<V> {
    pub fn new(vendedores: Arc<V>) -> Self {
        Self { vendedores }
    }
}

impl<V: VendedorRepository> RepositoryVendedorService<V> {
    /// Create an `ADMIN` seller for `email` unless one with that email exists.
    ///
    /// Returns `true` when a seller was created.
    pub async fn ensure_admin(&self, email: &str, senha: &str) -> Result<bool, Error> {
        let existing = self
            .vendedores
            .find_by_email(email.trim())
            .await
            .map_err(map_vendedor_repository_error)?;
        if existing.is_some() {
            return Ok(false);
        }

        let admin = NewVendedor::try_from_parts(
            Some("Administrador"),
            Some(email),
            Some(senha),
            Some(Role::Admin),
        )
        .map_err(|err| Error::invalid_request(format!("bootstrap admin: {err}")))?;
        let created = self
            .vendedores
            .insert(admin)
            .await
            .map_err(map_vendedor_repository_error)?;
        info!(id = %created.id, email = %created.email, "bootstrap admin created");
        Ok(true)
    }
}

#[async_trait]
impl<V> VendedorService for RepositoryVendedorService<V>
where
    V: VendedorRepository,
{
    async fn list(&self) -> Result<Vec<Vendedor>, Error> {
        self.vendedores
            .list()
            .await
            .map_err(map_vendedor_repository_error)
    }

    async fn get(&self, id: VendedorId) -> Result<Vendedor, Error> {
        self.vendedores
            .find_by_id(id)
            .await
            .map_err(map_vendedor_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, vendedor: NewVendedor) -> Result<Vendedor, Error> {
        let created = self
            .vendedores
            .insert(vendedor)
            .await
            .map_err(map_vendedor_repository_error)?;
        info!(id = %created.id, role = %created.role, "vendedor created");
        Ok(created)
    }

    async fn update(&self, id: VendedorId, update: VendedorUpdate) -> Result<Vendedor, Error> {
        let mut vendedor = self.get(id).await?;
        update.apply_to(&mut vendedor);
        self.vendedores
            .update(&vendedor)
            .await
            .map_err(map_vendedor_repository_error)?;
        info!(%id, "vendedor updated");
        Ok(vendedor)
    }

    async fn delete(&self, id: VendedorId) -> Result<(), Error> {
        self.vendedores
            .delete(id)
            .await
            .map_err(map_vendedor_repository_error)?;
        info!(%id, "vendedor deleted");
        Ok(())
    }
}
