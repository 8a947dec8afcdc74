//! PostgreSQL-backed `UserRepository`.
//!
//! `users_email_key` and `users_username_key` enforce uniqueness; a
//! violation of either is reported as `Duplicate` naming the column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use super::error_mapping::{map_diesel_error, map_pool_error, unique_violation_field};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

const UNIQUE_COLUMNS: [&str; 2] = ["email", "username"];

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel(error: DieselError) -> UserPersistenceError {
    if let Some(field) = unique_violation_field(&error, &UNIQUE_COLUMNS) {
        return UserPersistenceError::duplicate(field);
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::email)
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter()
            .map(|row| {
                User::try_from(row).map_err(|err| {
                    UserPersistenceError::query(format!("stored user failed validation: {err}"))
                })
            })
            .collect()
    }
}
