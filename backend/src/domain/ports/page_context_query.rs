//! Driving port for the public page read model.

use async_trait::async_trait;

use crate::domain::PageContext;

/// Assemble the page render context. Never fails: missing or unreadable
/// content degrades to absent fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageContextQuery: Send + Sync {
    async fn page_context(&self) -> PageContext;
}
