//! Driving port for administrative singleton writes and listings.

use async_trait::async_trait;

use crate::domain::content::{SingletonKind, SingletonRecord};
use crate::domain::{Error, ListFilter, SingletonWrite};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SingletonContentCommand: Send + Sync {
    /// Create or update a singleton row, enforcing the single-active rule.
    async fn save(&self, write: SingletonWrite) -> Result<SingletonRecord, Error>;

    /// Rows of `kind` narrowed by `filter`.
    async fn list(
        &self,
        kind: SingletonKind,
        filter: &ListFilter,
    ) -> Result<Vec<SingletonRecord>, Error>;
}
