//! Seller accounts (vendedores) and their merge rules.
//!
//! ## Invariants
//! - A persisted seller always carries a tagged [`StoredCredential`].
//! - `email` identifies the seller at login; uniqueness is enforced by the
//!   repository.
//! - Creation defaults the role to [`Role::Vendedor`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::StoredCredential;

/// Store-generated seller identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct VendedorId(i64);

impl VendedorId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VendedorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access role granted to a seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Vendedor,
}

impl Role {
    /// Upper-case wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Vendedor => "VENDEDOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "VENDEDOR" => Ok(Self::Vendedor),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Persisted seller account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendedor {
    pub id: VendedorId,
    pub nome: String,
    pub email: String,
    pub senha: StoredCredential,
    pub role: Role,
}

/// Validation failures for seller creation and update input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VendedorValidationError {
    #[error("nome must not be empty")]
    EmptyNome,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("senha must not be empty")]
    EmptySenha,
}

impl VendedorValidationError {
    /// Name of the offending input field.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyNome => "nome",
            Self::EmptyEmail => "email",
            Self::EmptySenha => "senha",
        }
    }

    /// Machine-readable validation code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyNome => "empty_nome",
            Self::EmptyEmail => "empty_email",
            Self::EmptySenha => "empty_senha",
        }
    }
}

/// Validated input for creating a seller; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendedor {
    pub nome: String,
    pub email: String,
    pub senha: StoredCredential,
    pub role: Role,
}

impl NewVendedor {
    /// Validate raw creation fields, defaulting the role and tagging the
    /// credential.
    ///
    /// # Examples
    /// ```
    /// use agencia::domain::{NewVendedor, Role};
    ///
    /// let seller = NewVendedor::try_from_parts(Some("Ana"), Some("ana@agencia.com"), Some("123"), None)
    ///     .unwrap();
    /// assert_eq!(seller.role, Role::Vendedor);
    /// assert_eq!(seller.senha.as_str(), "{noop}123");
    /// ```
    pub fn try_from_parts(
        nome: Option<&str>,
        email: Option<&str>,
        senha: Option<&str>,
        role: Option<Role>,
    ) -> Result<Self, VendedorValidationError> {
        let nome = nome.map(str::trim).unwrap_or_default();
        if nome.is_empty() {
            return Err(VendedorValidationError::EmptyNome);
        }
        let email = email.map(str::trim).unwrap_or_default();
        if email.is_empty() {
            return Err(VendedorValidationError::EmptyEmail);
        }
        let senha = senha.unwrap_or_default();
        if senha.trim().is_empty() {
            return Err(VendedorValidationError::EmptySenha);
        }

        Ok(Self {
            nome: nome.to_owned(),
            email: email.to_owned(),
            senha: StoredCredential::normalize(senha),
            role: role.unwrap_or(Role::Vendedor),
        })
    }

    /// Attach the identifier handed out by the store.
    #[must_use]
    pub fn with_id(self, id: VendedorId) -> Vendedor {
        Vendedor {
            id,
            nome: self.nome,
            email: self.email,
            senha: self.senha,
            role: self.role,
        }
    }
}

/// Partial update for an existing seller: absent fields keep stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendedorUpdate {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub senha: Option<String>,
}

impl VendedorUpdate {
    /// Validate raw update fields. A present `nome` or `email` must not be
    /// blank, mirroring creation; `senha` may be blank to keep the current
    /// credential.
    pub fn try_from_parts(
        nome: Option<&str>,
        email: Option<&str>,
        senha: Option<String>,
        role: Option<Role>,
    ) -> Result<Self, VendedorValidationError> {
        let nome = nome.map(str::trim);
        if nome.is_some_and(str::is_empty) {
            return Err(VendedorValidationError::EmptyNome);
        }
        let email = email.map(str::trim);
        if email.is_some_and(str::is_empty) {
            return Err(VendedorValidationError::EmptyEmail);
        }
        Ok(Self {
            nome: nome.map(str::to_owned),
            email: email.map(str::to_owned),
            role,
            senha,
        })
    }

    /// Merge present fields into `target`.
    ///
    /// A blank `senha` keeps the current credential; a non-blank one replaces
    /// it after normalisation.
    pub fn apply_to(&self, target: &mut Vendedor) {
        if let Some(nome) = &self.nome {
            target.nome.clone_from(nome);
        }
        if let Some(email) = &self.email {
            target.email.clone_from(email);
        }
        if let Some(role) = self.role {
            target.role = role;
        }
        if let Some(senha) = self.senha.as_deref().filter(|raw| !raw.trim().is_empty()) {
            target.senha = StoredCredential::normalize(senha);
        }
    }
}
