//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Query`, `*Command`, [`LoginService`]) are what inbound adapters
//! call.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_content_command;
mod catalogue_repository;
mod contact_intake_command;
mod login_service;
mod message_repository;
mod page_content_repository;
mod page_context_query;
mod singleton_content_command;
mod singleton_repository;
mod user_accounts_command;
mod user_repository;

pub use catalogue_content_command::CatalogueContentCommand;
#[cfg(test)]
pub use catalogue_content_command::MockCatalogueContentCommand;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use contact_intake_command::{ContactIntakeCommand, MessagesQuery};
#[cfg(test)]
pub use contact_intake_command::{MockContactIntakeCommand, MockMessagesQuery};
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use message_repository::{MessageRepository, MessageRepositoryError};
#[cfg(test)]
pub use message_repository::MockMessageRepository;
pub use page_content_repository::{
    ContentRepositoryError, FieldRead, PageContentRepository, PageContentSnapshot,
};
#[cfg(test)]
pub use page_content_repository::MockPageContentRepository;
pub use page_context_query::PageContextQuery;
#[cfg(test)]
pub use page_context_query::MockPageContextQuery;
pub use singleton_content_command::SingletonContentCommand;
#[cfg(test)]
pub use singleton_content_command::MockSingletonContentCommand;
#[cfg(test)]
pub use singleton_repository::MockSingletonRepository;
pub use singleton_repository::{SingletonRepository, SingletonRepositoryError, WriteMode};
pub use user_accounts_command::UserAccountsCommand;
#[cfg(test)]
pub use user_accounts_command::MockUserAccountsCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
