//! Stored seller credentials tagged with their encoding scheme.
//!
//! A stored credential always starts with a `{scheme}` tag. Raw input without a
//! tag is kept as plaintext under `{noop}`; values that already carry a tag
//! (for example a `{bcrypt}` hash produced elsewhere) are stored verbatim.

use std::fmt;

use tracing::warn;

/// Tag prefix for plaintext credentials.
pub const NOOP_TAG: &str = "{noop}";
/// Tag prefix for bcrypt hashes.
pub const BCRYPT_TAG: &str = "{bcrypt}";

/// Encoding scheme recognised from a credential's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    Noop,
    Bcrypt,
    Unknown,
}

/// Credential as persisted for a seller.
///
/// `Debug` output never includes the secret.
///
/// # Examples
/// ```
/// use agencia::domain::StoredCredential;
///
/// assert_eq!(StoredCredential::normalize("segredo").as_str(), "{noop}segredo");
/// assert_eq!(StoredCredential::normalize("{bcrypt}$2b$x").as_str(), "{bcrypt}$2b$x");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential(String);

impl StoredCredential {
    /// Tag raw input with `{noop}` unless it already starts with `{`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        if raw.starts_with('{') {
            Self(raw.to_owned())
        } else {
            Self(format!("{NOOP_TAG}{raw}"))
        }
    }

    /// Wrap a value read back from the store without re-tagging it.
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn scheme(&self) -> CredentialScheme {
        if self.0.starts_with(NOOP_TAG) {
            CredentialScheme::Noop
        } else if self.0.starts_with(BCRYPT_TAG) {
            CredentialScheme::Bcrypt
        } else {
            CredentialScheme::Unknown
        }
    }

    /// Check a presented plaintext credential against this stored value.
    ///
    /// Unknown schemes never verify.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        match self.scheme() {
            CredentialScheme::Noop => self.0.strip_prefix(NOOP_TAG) == Some(presented),
            CredentialScheme::Bcrypt => {
                let Some(hash) = self.0.strip_prefix(BCRYPT_TAG) else {
                    return false;
                };
                match bcrypt::verify(presented, hash) {
                    Ok(matches) => matches,
                    Err(error) => {
                        warn!(%error, "stored bcrypt credential is malformed");
                        false
                    }
                }
            }
            CredentialScheme::Unknown => false,
        }
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoredCredential")
            .field(&self.scheme())
            .finish()
    }
}
