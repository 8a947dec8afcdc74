//! Driving port for administrative user management.

use async_trait::async_trait;

use crate::domain::{Error, ListFilter, NewUserRequest, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Validate and create a user account.
    async fn create(&self, request: NewUserRequest) -> Result<User, Error>;

    /// Users ordered by email, narrowed by `filter`.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<User>, Error>;
}
