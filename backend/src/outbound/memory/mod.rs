//! In-process repositories for running without PostgreSQL.
//!
//! State lives for the lifetime of the process only.

mod pacote_repository;
mod vendedor_repository;

pub use pacote_repository::InMemoryPacoteRepository;
pub use vendedor_repository::InMemoryVendedorRepository;
