//! PostgreSQL-backed `MessageRepository`. Inserts and reads only.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MessageRow, NewMessageRow};
use super::pool::DbPool;
use super::schema::messages;
use crate::domain::Message;
use crate::domain::ports::{MessageRepository, MessageRepositoryError};

#[derive(Clone)]
pub struct DieselMessageRepository {
    pool: DbPool,
}

impl DieselMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel(error: diesel::result::Error) -> MessageRepositoryError {
    map_diesel_error(
        error,
        MessageRepositoryError::query,
        MessageRepositoryError::connection,
    )
}

#[async_trait]
impl MessageRepository for DieselMessageRepository {
    async fn append(&self, message: &Message) -> Result<(), MessageRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MessageRepositoryError::connection))?;
        diesel::insert_into(messages::table)
            .values(NewMessageRow::from(message))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list(&self) -> Result<Vec<Message>, MessageRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MessageRepositoryError::connection))?;
        let rows: Vec<MessageRow> = messages::table
            .select(MessageRow::as_select())
            .order_by((messages::created.desc(), messages::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
