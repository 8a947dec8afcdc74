//! Driving ports for the contact form and the admin message inbox.

use async_trait::async_trait;

use crate::domain::{ContactSubmissionRequest, Error, ListFilter, Message};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactIntakeCommand: Send + Sync {
    /// Validate and store one visitor message. All-or-nothing.
    async fn submit(&self, request: ContactSubmissionRequest) -> Result<Message, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagesQuery: Send + Sync {
    /// Stored messages, newest first, narrowed by `filter`.
    async fn list_messages(&self, filter: &ListFilter) -> Result<Vec<Message>, Error>;
}
