//! Driven port for catalogue rows: skills, projects, contact details,
//! section toggles and footers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::{CatalogueKind, CatalogueRecord};

use super::{WriteMode, define_port_error};

define_port_error! {
    /// Persistence errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Connection or pool checkout failed.
        Connection { message: String } => "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "catalogue repository query failed: {message}",
        /// An update or delete targeted a row that does not exist.
        NotFound { id: Uuid } => "catalogue row {id} not found",
        /// A foreign key names a row that does not exist.
        MissingReference { field: String } => "{field} refers to a missing row",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Persist `record` and return it as stored.
    ///
    /// Updates keep a project's original `created` timestamp and replace its
    /// skill links wholesale.
    async fn save(
        &self,
        record: &CatalogueRecord,
        mode: WriteMode,
    ) -> Result<CatalogueRecord, CatalogueRepositoryError>;

    /// Every row of `kind` in its default admin ordering.
    async fn list(
        &self,
        kind: CatalogueKind,
    ) -> Result<Vec<CatalogueRecord>, CatalogueRepositoryError>;

    /// Delete one row.
    ///
    /// Skills of a deleted group and items or links of a deleted contact stay,
    /// with the reference cleared. A deleted skill drops its project links;
    /// the projects stay.
    async fn delete(&self, kind: CatalogueKind, id: Uuid) -> Result<(), CatalogueRepositoryError>;
}
