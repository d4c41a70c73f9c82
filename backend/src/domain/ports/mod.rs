//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, image storage, session store) are implemented
//! by outbound adapters; driving ports (login, package and seller services)
//! are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod image_storage;
mod login_service;
mod pacote_repository;
mod pacote_service;
mod session_store;
mod vendedor_repository;
mod vendedor_service;

pub use image_storage::{ImageStorage, ImageStorageError};
#[cfg(test)]
pub use image_storage::MockImageStorage;
pub use login_service::{INVALID_CREDENTIALS_MESSAGE, LoginService};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use pacote_repository::{PacoteRepository, PacoteRepositoryError};
#[cfg(test)]
pub use pacote_repository::MockPacoteRepository;
pub use pacote_service::PacoteService;
#[cfg(test)]
pub use pacote_service::MockPacoteService;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use vendedor_repository::{VendedorRepository, VendedorRepositoryError};
#[cfg(test)]
pub use vendedor_repository::MockVendedorRepository;
pub use vendedor_service::VendedorService;
#[cfg(test)]
pub use vendedor_service::MockVendedorService;
