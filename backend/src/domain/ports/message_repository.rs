//! Driven port for visitor messages. Append-only: no update path exists.

use async_trait::async_trait;

use crate::domain::Message;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by message repository adapters.
    pub enum MessageRepositoryError {
        /// Connection or pool checkout failed.
        Connection { message: String } => "message repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "message repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a new message.
    async fn append(&self, message: &Message) -> Result<(), MessageRepositoryError>;

    /// All messages, newest first.
    async fn list(&self) -> Result<Vec<Message>, MessageRepositoryError>;
}
