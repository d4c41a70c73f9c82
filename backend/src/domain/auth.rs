//! Authentication primitives: login credentials and the session principal.
//!
//! Inbound adapters validate raw payloads through these constructors before
//! calling the login port.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::Role;

/// Login payload values that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Credential was empty.
    EmptySenha,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptySenha => write!(f, "senha must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `senha` is non-empty and kept byte-for-byte; the buffer is zeroed on drop.
///
/// # Examples
/// ```
/// use agencia::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@agencia.com ", "123").unwrap();
/// assert_eq!(creds.email(), "admin@agencia.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    senha: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, senha: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if senha.is_empty() {
            return Err(LoginValidationError::EmptySenha);
        }
        Ok(Self {
            email: email.to_owned(),
            senha: Zeroizing::new(senha.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn senha(&self) -> &str {
        self.senha.as_str()
    }
}

/// Identity resolved from the session for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}
