//! Application settings loaded via OrthoConfig.
//!
//! Every field can come from CLI flags, `ACCOUNTS_*` environment variables,
//! or a configuration file. Accessors apply defaults and validate values so
//! `main` only sees typed settings.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::Key;
use argon2::Params;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::PasswordHasherError;
use crate::domain::{AccountValidationError, AdminSeed, EmailAddress, Password, Username};
use crate::outbound::hashing::Argon2PasswordHasher;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 5;
/// `Key::derive_from` needs at least this much master key material.
const SESSION_KEY_MIN_LEN: usize = 32;

/// Errors raised while validating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid notification url '{value}': {source}")]
    NotificationUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("bootstrap admin needs username, email, and password together")]
    PartialBootstrapAdmin,
    #[error("invalid bootstrap admin: {0}")]
    BootstrapAdmin(#[from] AccountValidationError),
    #[error("invalid argon2 costs: {0}")]
    HasherCosts(#[from] PasswordHasherError),
}

/// Top-level service settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it accounts live in memory.
    pub database_url: Option<String>,
    /// Notification service endpoint. Without it notifications are logged.
    pub notification_url: Option<String>,
    /// Per-request timeout for notification delivery.
    pub notification_timeout_secs: Option<u64>,
    /// File holding the session cookie master key.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random per-process session key when the file is missing.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Include password hashes in responses and notification bodies.
    #[ortho_config(default = false)]
    pub expose_password_hash: bool,
    pub bootstrap_admin_username: Option<String>,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
    /// Argon2 memory cost in KiB.
    pub argon2_memory_kib: Option<u32>,
    pub argon2_iterations: Option<u32>,
    pub argon2_parallelism: Option<u32>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed notification endpoint, if one is configured.
    pub fn notification_url(&self) -> Result<Option<Url>, SettingsError> {
        self.notification_url
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::NotificationUrl {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(
            self.notification_timeout_secs
                .unwrap_or(DEFAULT_NOTIFICATION_TIMEOUT_SECS),
        )
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Load the session key, or generate one when ephemeral keys are allowed.
    ///
    /// Ephemeral keys invalidate every session on restart and differ between
    /// replicas; they are meant for local development.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(bytes) => {
                let bytes = Zeroizing::new(bytes);
                if bytes.len() < SESSION_KEY_MIN_LEN {
                    return Err(SettingsError::KeyTooShort {
                        path: path.to_path_buf(),
                        length: bytes.len(),
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                Ok(Key::derive_from(&bytes))
            }
            Err(error) if self.session_allow_ephemeral => {
                warn!(path = %path.display(), %error, "using temporary session key");
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Argon2id hasher using the configured costs.
    ///
    /// Unset costs fall back to the argon2 crate defaults.
    pub fn password_hasher(&self) -> Result<Argon2PasswordHasher, SettingsError> {
        Ok(Argon2PasswordHasher::with_costs(
            self.argon2_memory_kib.unwrap_or(Params::DEFAULT_M_COST),
            self.argon2_iterations.unwrap_or(Params::DEFAULT_T_COST),
            self.argon2_parallelism.unwrap_or(Params::DEFAULT_P_COST),
        )?)
    }

    /// The admin to seed at startup, if all three fields are set.
    pub fn bootstrap_admin(&self) -> Result<Option<AdminSeed>, SettingsError> {
        match (
            self.bootstrap_admin_username.as_deref(),
            self.bootstrap_admin_email.as_deref(),
            self.bootstrap_admin_password.as_deref(),
        ) {
            (None, None, None) => Ok(None),
            (Some(username), Some(email), Some(password)) => Ok(Some(AdminSeed {
                username: Username::new(username)?,
                email: EmailAddress::new(email)?,
                password: Password::new(password),
            })),
            _ => Err(SettingsError::PartialBootstrapAdmin),
        }
    }
}
