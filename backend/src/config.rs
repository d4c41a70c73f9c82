//! Application settings loaded via OrthoConfig.
//!
//! Values come from `AGENCIA_*` environment variables, command-line flags and
//! configuration files. Everything is optional; accessors supply defaults.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;

const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process configuration for the back office server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AGENCIA")]
pub struct AppSettings {
    /// Root directory for uploaded files, served under `/files`.
    pub upload_dir: Option<PathBuf>,
    /// Front-end assets served for non-API paths when the directory exists.
    pub static_dir: Option<PathBuf>,
    /// Listen address.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory repositories are used when absent.
    pub database_url: Option<String>,
    /// Email of the administrator created at startup when missing.
    pub admin_email: Option<String>,
    /// Credential for the bootstrap administrator.
    pub admin_password: Option<String>,
    /// Largest accepted image upload, in bytes.
    pub max_upload_bytes: Option<usize>,
}

impl AppSettings {
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_UPLOAD_DIR))
    }

    pub fn static_dir(&self) -> &Path {
        self.static_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STATIC_DIR))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Bootstrap administrator `(email, credential)` when both are set.
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        let email = self.admin_email.as_deref().map(str::trim)?;
        let senha = self.admin_password.as_deref()?;
        (!email.is_empty() && !senha.is_empty()).then_some((email, senha))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "AGENCIA_UPLOAD_DIR",
        "AGENCIA_STATIC_DIR",
        "AGENCIA_BIND_ADDR",
        "AGENCIA_DATABASE_URL",
        "AGENCIA_ADMIN_EMAIL",
        "AGENCIA_ADMIN_PASSWORD",
        "AGENCIA_MAX_UPLOAD_BYTES",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("agencia")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(settings.upload_dir(), Path::new("uploads"));
        assert_eq!(settings.static_dir(), Path::new("static"));
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url().is_none());
        assert!(settings.bootstrap_admin().is_none());
        assert_eq!(settings.max_upload_bytes(), DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("AGENCIA_UPLOAD_DIR", Some("/srv/agencia/uploads".to_owned())),
            ("AGENCIA_STATIC_DIR", None),
            ("AGENCIA_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("AGENCIA_DATABASE_URL", Some("postgres://localhost/agencia".to_owned())),
            ("AGENCIA_ADMIN_EMAIL", Some("admin@agencia.com".to_owned())),
            ("AGENCIA_ADMIN_PASSWORD", Some("123".to_owned())),
            ("AGENCIA_MAX_UPLOAD_BYTES", Some("2048".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.upload_dir(), Path::new("/srv/agencia/uploads"));
        assert_eq!(
            settings.bind_addr().expect("address").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/agencia"));
        assert_eq!(settings.bootstrap_admin(), Some(("admin@agencia.com", "123")));
        assert_eq!(settings.max_upload_bytes(), 2048);
    }

    #[rstest]
    #[case(Some("admin@agencia.com"), None)]
    #[case(Some("  "), Some("123"))]
    #[case(None, Some("123"))]
    fn bootstrap_admin_needs_both_values(
        #[case] email: Option<&str>,
        #[case] senha: Option<&str>,
    ) {
        let settings = AppSettings {
            upload_dir: None,
            static_dir: None,
            bind_addr: None,
            database_url: Some("   ".to_owned()),
            admin_email: email.map(str::to_owned),
            admin_password: senha.map(str::to_owned),
            max_upload_bytes: None,
        };
        assert!(settings.bootstrap_admin().is_none());
        assert!(settings.database_url().is_none());
    }
}
