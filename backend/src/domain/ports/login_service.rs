//! Driving port for login and "who am I" use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, Vendedor};

/// Message returned for every rejected login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciais inválidas";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the matching seller.
    ///
    /// Unknown emails and wrong credentials fail identically with
    /// [`INVALID_CREDENTIALS_MESSAGE`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Vendedor, Error>;

    /// Reload the seller behind an authenticated principal.
    async fn current(&self, principal: &Principal) -> Result<Vendedor, Error>;
}
