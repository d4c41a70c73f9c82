//! Driving port for seller management.

use async_trait::async_trait;

use crate::domain::{Error, NewVendedor, Vendedor, VendedorId, VendedorUpdate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendedorService: Send + Sync {
    async fn list(&self) -> Result<Vec<Vendedor>, Error>;

    async fn get(&self, id: VendedorId) -> Result<Vendedor, Error>;

    async fn create(&self, vendedor: NewVendedor) -> Result<Vendedor, Error>;

    /// Apply a partial update (see [`VendedorUpdate::apply_to`]).
    async fn update(&self, id: VendedorId, update: VendedorUpdate) -> Result<Vendedor, Error>;

    /// Best-effort delete.
    async fn delete(&self, id: VendedorId) -> Result<(), Error>;
}
