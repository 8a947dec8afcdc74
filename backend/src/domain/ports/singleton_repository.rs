//! Driven port for singleton content rows (metadata, hero, about).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::{SingletonKind, SingletonRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by singleton repository adapters.
    pub enum SingletonRepositoryError {
        /// Connection or pool checkout failed.
        Connection { message: String } => "singleton repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "singleton repository query failed: {message}",
        /// An update targeted a row that does not exist.
        NotFound { id: Uuid } => "singleton row {id} not found",
    }
}

/// Whether a repository save creates a row or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Insert,
    Update,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SingletonRepository: Send + Sync {
    /// Persist `record` atomically.
    ///
    /// When the record is active, every other row of the same kind is
    /// deactivated first, inside the same transaction; an inactive record
    /// leaves its siblings untouched. Concurrent writers of one kind are
    /// serialised so exactly one active row survives.
    async fn save_exclusive(
        &self,
        record: &SingletonRecord,
        mode: WriteMode,
    ) -> Result<(), SingletonRepositoryError>;

    /// Every row of `kind` in its default admin ordering.
    async fn list(
        &self,
        kind: SingletonKind,
    ) -> Result<Vec<SingletonRecord>, SingletonRepositoryError>;
}
