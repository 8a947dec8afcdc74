//! Administrator login.
//!
//! Credentials are validated into [`LoginCredentials`] at the edge; the
//! [`ConfiguredLoginService`] checks them against a username and an argon2
//! PHC password hash loaded from configuration.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use async_trait::async_trait;
use tracing::{error, warn};
use zeroize::Zeroizing;

use crate::domain::Error;
use crate::domain::ports::LoginService;

pub use argon2::password_hash::Error as PasswordHashError;

/// Rejected login payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; it is zeroised on drop.
///
/// # Examples
/// ```
/// use portfolio::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "s3cret").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The authenticated administrator stored in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity(String);

impl AdminIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn username(&self) -> &str {
        self.0.as_str()
    }
}

/// Argon2id PHC string for `password` under a fresh random salt.
///
/// # Examples
/// ```
/// use portfolio::domain::hash_password;
///
/// let phc = hash_password("password").unwrap();
/// assert!(phc.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Login service backed by one configured administrator account.
#[derive(Clone)]
pub struct ConfiguredLoginService {
    username: String,
    password_hash: Zeroizing<String>,
}

impl ConfiguredLoginService {
    /// `password_hash` is a PHC string such as [`hash_password`] produces.
    ///
    /// Fails when the hash does not parse as a PHC string.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, PasswordHashError> {
        let password_hash = Zeroizing::new(password_hash.into().trim().to_owned());
        PasswordHash::new(&password_hash)?;
        Ok(Self {
            username: username.into().trim().to_owned(),
            password_hash,
        })
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        let hash = PasswordHash::new(&self.password_hash).map_err(|err| {
            error!(error = %err, "configured administrator hash no longer parses");
            Error::internal("administrator login is misconfigured")
        })?;
        // Verify even for an unknown username so both rejections cost the same.
        let password_ok = Argon2::default()
            .verify_password(credentials.password().as_bytes(), &hash)
            .is_ok();
        let user_ok = credentials.username() == self.username;
        if user_ok && password_ok {
            Ok(AdminIdentity::new(self.username.clone()))
        } else {
            warn!(username = credentials.username(), "administrator login rejected");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

/// Login service used when no administrator is configured; rejects everyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLoginService;

#[async_trait]
impl LoginService for DisabledLoginService {
    async fn authenticate(&self, _credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        Err(Error::unauthorized("administrator login is not configured"))
    }
}
