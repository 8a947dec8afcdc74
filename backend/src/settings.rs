//! Process configuration loaded via OrthoConfig.
//!
//! Every value may come from the command line, a configuration file or a
//! `PORTFOLIO_*` environment variable. Session toggles are validated against
//! the build mode: debug builds warn and fall back to defaults, release builds
//! refuse to start on a missing or invalid value.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::domain::ports::LoginService;
use crate::domain::{AdminSiteSettings, ConfiguredLoginService, DisabledLoginService};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Below this `Key::derive_from` cannot work at all.
const SESSION_KEY_MIN_LEN: usize = 32;
const SESSION_KEY_RELEASE_MIN_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const PASSWORD_HASH_EXPECTED: &str = "an argon2 PHC string such as $argon2id$v=19$...";
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates defaults and warns about missing toggles.
    Debug,
    /// Requires explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// ```rust
    /// use portfolio::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Cookie session parameters.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Rejected configuration.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
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
    #[error("PORTFOLIO_SAME_SITE=None requires PORTFOLIO_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("PORTFOLIO_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Top-level configuration of the portfolio server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTFOLIO")]
pub struct PortfolioSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    pub session_key_file: Option<PathBuf>,
    pub cookie_secure: Option<String>,
    pub same_site: Option<String>,
    pub allow_ephemeral: Option<String>,
    pub admin_username: Option<String>,
    /// Argon2 PHC hash of the administrator password.
    pub admin_password_hash: Option<String>,
    pub site_header: Option<String>,
    pub site_title: Option<String>,
    pub index_title: Option<String>,
    /// Absolute site URL used by robots.txt and the sitemap.
    pub public_base_url: Option<String>,
}

impl PortfolioSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|_| SettingsError::Invalid {
            name: "PORTFOLIO_BIND_ADDR",
            value: raw.to_owned(),
            expected: "host:port",
        })
    }

    /// The database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn public_base_url(&self) -> &str {
        self.public_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
    }

    pub fn admin_site(&self) -> AdminSiteSettings {
        AdminSiteSettings::new(
            self.site_header.clone(),
            self.site_title.clone(),
            self.index_title.clone(),
        )
    }

    /// Login service for the configured administrator.
    ///
    /// Without both a username and a password hash every login is rejected.
    pub fn login_service(&self) -> Result<Arc<dyn LoginService>, SettingsError> {
        let username = self
            .admin_username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let hash = self
            .admin_password_hash
            .as_deref()
            .map(str::trim)
            .filter(|hash| !hash.is_empty());
        match (username, hash) {
            (Some(username), Some(hash)) => {
                let service = ConfiguredLoginService::new(username, hash).map_err(|_| {
                    SettingsError::Invalid {
                        name: "PORTFOLIO_ADMIN_PASSWORD_HASH",
                        value: "<redacted>".to_owned(),
                        expected: PASSWORD_HASH_EXPECTED,
                    }
                })?;
                Ok(Arc::new(service))
            }
            (None, None) => {
                warn!("no administrator configured; admin login disabled");
                Ok(Arc::new(DisabledLoginService))
            }
            (Some(_), None) => Err(SettingsError::Missing {
                name: "PORTFOLIO_ADMIN_PASSWORD_HASH",
            }),
            (None, Some(_)) => Err(SettingsError::Missing {
                name: "PORTFOLIO_ADMIN_USERNAME",
            }),
        }
    }

    /// Validate the session toggles for `mode` and load the signing key.
    pub fn session_settings(&self, mode: BuildMode) -> Result<SessionSettings, SettingsError> {
        let cookie_secure = self.cookie_secure(mode)?;
        let same_site = self.same_site(mode, cookie_secure)?;
        let allow_ephemeral = self.allow_ephemeral(mode)?;
        let key = self.session_key(mode, allow_ephemeral)?;
        Ok(SessionSettings {
            key,
            cookie_secure,
            same_site,
        })
    }

    fn cookie_secure(&self, mode: BuildMode) -> Result<bool, SettingsError> {
        const NAME: &str = "PORTFOLIO_COOKIE_SECURE";
        match self.cookie_secure.as_deref() {
            Some(value) => match parse_bool(value) {
                Some(flag) => Ok(flag),
                None if mode.is_debug() => {
                    warn!(value, "invalid {NAME}; defaulting to secure");
                    Ok(true)
                }
                None => Err(SettingsError::Invalid {
                    name: NAME,
                    value: value.to_owned(),
                    expected: BOOL_EXPECTED,
                }),
            },
            None if mode.is_debug() => {
                warn!("{NAME} not set; defaulting to secure");
                Ok(true)
            }
            None => Err(SettingsError::Missing { name: NAME }),
        }
    }

    fn same_site(&self, mode: BuildMode, cookie_secure: bool) -> Result<SameSite, SettingsError> {
        const NAME: &str = "PORTFOLIO_SAME_SITE";
        let fallback = if mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        };
        let Some(value) = self.same_site.as_deref() else {
            if mode.is_debug() {
                warn!("{NAME} not set; using default");
                return Ok(fallback);
            }
            return Err(SettingsError::Missing { name: NAME });
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" if mode.is_debug() => {
                warn!("SameSite=None without secure cookies; browsers may reject the cookie");
                Ok(SameSite::None)
            }
            "none" => Err(SettingsError::InsecureSameSiteNone),
            _ if mode.is_debug() => {
                warn!(value, "invalid {NAME}; using default");
                Ok(fallback)
            }
            _ => Err(SettingsError::Invalid {
                name: NAME,
                value: value.to_owned(),
                expected: SAMESITE_EXPECTED,
            }),
        }
    }

    fn allow_ephemeral(&self, mode: BuildMode) -> Result<bool, SettingsError> {
        const NAME: &str = "PORTFOLIO_ALLOW_EPHEMERAL";
        match self.allow_ephemeral.as_deref().map(parse_bool) {
            Some(Some(true)) if mode.is_debug() => Ok(true),
            Some(Some(true)) => Err(SettingsError::EphemeralNotAllowed),
            Some(Some(false)) => Ok(false),
            Some(None) if mode.is_debug() => {
                warn!("invalid {NAME}; defaulting to disabled");
                Ok(false)
            }
            Some(None) => Err(SettingsError::Invalid {
                name: NAME,
                value: self.allow_ephemeral.clone().unwrap_or_default(),
                expected: BOOL_EXPECTED,
            }),
            None if mode.is_debug() => Ok(false),
            None => Err(SettingsError::Missing { name: NAME }),
        }
    }

    fn session_key(&self, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SettingsError> {
        let path = self
            .session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));
        let min_len = match mode {
            BuildMode::Debug => SESSION_KEY_MIN_LEN,
            BuildMode::Release => SESSION_KEY_RELEASE_MIN_LEN,
        };

        match std::fs::read(&path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < min_len {
                    bytes.zeroize();
                    return Err(SettingsError::KeyTooShort {
                        path,
                        length,
                        min_len,
                    });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                info!(
                    path = %path.display(),
                    fingerprint = %key_fingerprint(&key),
                    "loaded session key"
                );
                Ok(key)
            }
            Err(error) if mode.is_debug() || allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            }
            Err(error) => Err(SettingsError::KeyRead {
                path,
                source: error,
            }),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// First bytes of the SHA-256 of the signing key, hex encoded.
///
/// Lets operators tell which key is live without logging key material.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
