//! Portfolio domain: content entities, use-case services and ports.
//!
//! Public surface:
//! - [`SingletonContentService`]: write path keeping one active metadata,
//!   hero and about row.
//! - [`CatalogueContentService`]: admin writes, listings and deletes for
//!   skills, projects, contact details, section toggles and footers.
//! - [`PageContextService`]: degradable read model for the public page.
//! - [`ContactIntakeService`]: contact form intake and message inbox.
//! - [`UserAccountService`]: admin user management.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic error envelope.

pub mod admin;
pub mod auth;
pub mod catalogue_content;
pub mod contact_intake;
pub mod content;
pub mod error;
pub mod page_context;
pub mod ports;
pub mod singleton_content;
pub mod trace_id;
pub mod user;
pub mod user_accounts;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::admin::{AdminSiteSettings, EntityKind, ListFilter, ListQuery};
pub use self::auth::{
    AdminIdentity, ConfiguredLoginService, DisabledLoginService, LoginCredentials,
    LoginValidationError, PasswordHashError, hash_password,
};
pub use self::catalogue_content::{CatalogueContentService, CatalogueWrite};
pub use self::contact_intake::{
    ContactField, ContactIntakeService, ContactSubmissionRequest, ContactValidationError, Message,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::page_context::{PageContext, PageContextService, order_projects};
pub use self::singleton_content::{SingletonContentService, SingletonWrite, WriteTarget};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, NewUserRequest, PhoneNumber, User, UserValidationError, Username};
pub use self::user_accounts::UserAccountService;

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
