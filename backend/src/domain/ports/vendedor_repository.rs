//! Port for seller persistence.

use async_trait::async_trait;

use crate::domain::{NewVendedor, Vendedor, VendedorId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by seller repository adapters.
    pub enum VendedorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vendedor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vendedor repository query failed: {message}",
        /// Another seller already uses this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Seller storage keyed by store-generated id, with a login lookup by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendedorRepository: Send + Sync {
    /// All sellers ordered by id.
    async fn list(&self) -> Result<Vec<Vendedor>, VendedorRepositoryError>;

    async fn find_by_id(&self, id: VendedorId)
    -> Result<Option<Vendedor>, VendedorRepositoryError>;

    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<Vendedor>, VendedorRepositoryError>;

    /// Persist a new seller and return it with its generated id.
    async fn insert(&self, vendedor: NewVendedor) -> Result<Vendedor, VendedorRepositoryError>;

    /// Overwrite every column of an existing seller.
    async fn update(&self, vendedor: &Vendedor) -> Result<(), VendedorRepositoryError>;

    /// Remove a seller; missing ids are not an error.
    async fn delete(&self, id: VendedorId) -> Result<(), VendedorRepositoryError>;
}
