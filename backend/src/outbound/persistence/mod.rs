//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between row structs and domain types; rows and
//! the schema stay private to this module. Connections come from a `bb8` pool
//! of `diesel-async` connections.
//!
//! ```ignore
//! use agencia::outbound::persistence::{DbPool, DieselPacoteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/agencia")).await?;
//! let pacotes = DieselPacoteRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_pacote_repository;
mod diesel_vendedor_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_pacote_repository::DieselPacoteRepository;
pub use diesel_vendedor_repository::DieselVendedorRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
