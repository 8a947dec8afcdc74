//! User account administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::admin::{EntityKind, ListFilter};
use crate::domain::ports::{UserAccountsCommand, UserPersistenceError, UserRepository};
use crate::domain::{Error, NewUserRequest, User};

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("a user with this {field} already exists"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

#[derive(Clone)]
pub struct UserAccountService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserAccountService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> UserAccountsCommand for UserAccountService<R>
where
    R: UserRepository,
{
    async fn create(&self, request: NewUserRequest) -> Result<User, Error> {
        let user = request
            .into_user(Uuid::new_v4(), self.clock.utc())
            .map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": err.field(), "code": "invalid_field" }))
            })?;
        self.repo.insert(&user).await.map_err(map_persistence_error)?;
        info!(id = %user.id, "user account created");
        Ok(user)
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<User>, Error> {
        filter
            .supported_by(EntityKind::User)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let users = self.repo.list().await.map_err(map_persistence_error)?;
        Ok(filter.apply(EntityKind::User, users))
    }
}
