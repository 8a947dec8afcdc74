//! User accounts managed from the admin surface.
//!
//! Identity columns are validated newtypes; profile text is bounded to the
//! column widths of the `users` table.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::admin::Listable;
use crate::domain::content::{ContentValidationError, bounded_text, optional_url};

pub const USERNAME_MIN: usize = 4;
pub const USERNAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 254;
pub const NAME_MAX: usize = 100;
pub const BIO_MAX: usize = 1012;
const PROFILE_PICTURE_MAX: usize = 255;

/// Validation errors for user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must look like local@domain.tld")]
    InvalidEmail,
    #[error("email must be at most {EMAIL_MAX} characters")]
    EmailTooLong,
    #[error("username must have at least {USERNAME_MIN} characters")]
    UsernameTooShort,
    #[error("username must be at most {USERNAME_MAX} characters")]
    UsernameTooLong,
    #[error("phone number must contain between 9 and 15 digits")]
    InvalidPhone,
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("{field} must be an absolute http or https URL")]
    InvalidUrl { field: &'static str },
}

impl UserValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail | Self::EmailTooLong => "email",
            Self::UsernameTooShort | Self::UsernameTooLong => "username",
            Self::InvalidPhone => "phone",
            Self::FieldTooLong { field, .. } | Self::InvalidUrl { field } => field,
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{9,15}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Unique login name, 4 to 100 characters after trimming.
///
/// # Examples
/// ```
/// use portfolio::domain::Username;
///
/// assert!(Username::new("abc").is_err());
/// assert_eq!(Username::new(" abcd ").unwrap().as_ref(), "abcd");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ana.souza")]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort);
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Unique e-mail address with its domain lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ana@example.com")]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        let (local, domain) = trimmed
            .rsplit_once('@')
            .ok_or(UserValidationError::InvalidEmail)?;
        // Lower-casing may lengthen the domain, so bound the stored form.
        let normalised = format!("{local}@{}", domain.to_lowercase());
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Phone number of 9 to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "11987654321")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if !phone_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub username: Username,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub profile_picture: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl Listable for User {
    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            "email" => Some(self.email.as_ref()),
            "username" => Some(self.username.as_ref()),
            "bio" => self.bio.as_deref(),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Admin request creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl NewUserRequest {
    /// Minimal request with only the identity fields set.
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            first_name: None,
            last_name: None,
            bio: None,
            website: None,
            profile_picture: None,
            phone: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Validate into a [`User`] joined at `date_joined`.
    pub fn into_user(
        self,
        id: Uuid,
        date_joined: DateTime<Utc>,
    ) -> Result<User, UserValidationError> {
        let profile = |err: ContentValidationError| match err {
            ContentValidationError::TooLong { field, max } => {
                UserValidationError::FieldTooLong { field, max }
            }
            ContentValidationError::InvalidUrl { field } => {
                UserValidationError::InvalidUrl { field }
            }
        };
        let phone = match self.phone.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(PhoneNumber::new(raw)?),
        };
        Ok(User {
            id,
            email: Email::new(&self.email)?,
            username: Username::new(&self.username)?,
            first_name: bounded_text("firstName", self.first_name, NAME_MAX).map_err(profile)?,
            last_name: bounded_text("lastName", self.last_name, NAME_MAX).map_err(profile)?,
            bio: bounded_text("bio", self.bio, BIO_MAX).map_err(profile)?,
            website: optional_url("website", self.website).map_err(profile)?,
            profile_picture: bounded_text(
                "profilePicture",
                self.profile_picture,
                PROFILE_PICTURE_MAX,
            )
            .map_err(profile)?,
            phone,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            last_login: None,
            date_joined,
        })
    }
}
