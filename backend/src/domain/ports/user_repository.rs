//! Port abstraction for user account persistence.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column (`email` or `username`) already holds the value.
        Duplicate { field: String } => "user {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; uniqueness violations surface as `Duplicate`.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// All users ordered by email.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
