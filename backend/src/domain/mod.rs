//! Domain primitives, merge rules and services.
//!
//! Purpose: define the seller and package aggregates, their validation and
//! partial-update rules, and the services that drive them through ports.
//! Nothing here knows about HTTP, Diesel or the file system.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Vendedor, Pacote and their input/update types.
//! - StoredCredential: tagged credential with scheme-aware verification.
//! - Principal, SessionId, SessionRecord: session identity.
//! - Repository* services implementing the driving ports.

pub mod auth;
pub mod credential;
pub mod error;
pub mod file_storage;
pub mod login_service;
pub mod pacote;
pub mod pacote_service;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod upload;
pub mod vendedor;
pub mod vendedor_service;

pub use self::auth::{LoginCredentials, LoginValidationError, Principal};
pub use self::credential::{BCRYPT_TAG, CredentialScheme, NOOP_TAG, StoredCredential};
pub use self::error::{Error, ErrorCode};
pub use self::file_storage::FileStorage;
pub use self::login_service::RepositoryLoginService;
pub use self::pacote::{Hospedagem, Pacote, PacoteId, PacoteInput, Passagem};
pub use self::pacote_service::RepositoryPacoteService;
pub use self::session::{SessionId, SessionRecord};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{
    FILES_URL_PREFIX, ImageUpload, PACOTES_DIR, UploadRejection, public_image_url,
};
pub use self::vendedor::{
    NewVendedor, Role, UnknownRole, Vendedor, VendedorId, VendedorUpdate, VendedorValidationError,
};
pub use self::vendedor_service::RepositoryVendedorService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use agencia::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("acesso negado"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
