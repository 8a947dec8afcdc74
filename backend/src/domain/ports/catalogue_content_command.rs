//! Driving port for administrative catalogue writes and listings.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::{CatalogueKind, CatalogueRecord};
use crate::domain::{CatalogueWrite, Error, ListFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueContentCommand: Send + Sync {
    /// Create or update a catalogue row.
    async fn save(&self, write: CatalogueWrite) -> Result<CatalogueRecord, Error>;

    /// Rows of `kind` narrowed by `filter`.
    async fn list(
        &self,
        kind: CatalogueKind,
        filter: &ListFilter,
    ) -> Result<Vec<CatalogueRecord>, Error>;

    async fn delete(&self, kind: CatalogueKind, id: Uuid) -> Result<(), Error>;
}
