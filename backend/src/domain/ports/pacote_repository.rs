//! Port for package persistence.
//!
//! Ticket and lodging details are owned by the package row; adapters store and
//! load them together with it.

use async_trait::async_trait;

use crate::domain::{Pacote, PacoteId, PacoteInput};

use super::define_port_error;

define_port_error! {
    /// Errors raised by package repository adapters.
    pub enum PacoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "pacote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pacote repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PacoteRepository: Send + Sync {
    /// All packages ordered by id.
    async fn list(&self) -> Result<Vec<Pacote>, PacoteRepositoryError>;

    async fn find_by_id(&self, id: PacoteId) -> Result<Option<Pacote>, PacoteRepositoryError>;

    /// Persist a new package and return it with its generated id.
    async fn insert(&self, input: PacoteInput) -> Result<Pacote, PacoteRepositoryError>;

    /// Overwrite an existing package, nested details included.
    async fn update(&self, pacote: &Pacote) -> Result<(), PacoteRepositoryError>;

    /// Remove a package; missing ids are not an error.
    async fn delete(&self, id: PacoteId) -> Result<(), PacoteRepositoryError>;
}
