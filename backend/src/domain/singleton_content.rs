//! Write and list path for singleton content.
//!
//! Every create or update goes through [`SingletonContentService::save`],
//! which validates the draft and hands the record to the repository's
//! exclusive save. No other write path for metadata, hero or about exists.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::admin::{EntityKind, ListFilter};
use crate::domain::content::{SingletonDraft, SingletonKind, SingletonRecord};
use crate::domain::ports::{
    SingletonContentCommand, SingletonRepository, SingletonRepositoryError, WriteMode,
};

/// Whether a write creates a new row or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    Create,
    Update(Uuid),
}

/// A create-or-update request for one singleton row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonWrite {
    pub target: WriteTarget,
    pub draft: SingletonDraft,
}

pub(crate) fn entity_kind(kind: SingletonKind) -> EntityKind {
    match kind {
        SingletonKind::MetaData => EntityKind::MetaData,
        SingletonKind::Hero => EntityKind::Hero,
        SingletonKind::About => EntityKind::About,
    }
}

fn map_repository_error(error: SingletonRepositoryError) -> Error {
    match error {
        SingletonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("content store unavailable: {message}"))
        }
        SingletonRepositoryError::Query { message } => {
            Error::internal(format!("content store error: {message}"))
        }
        SingletonRepositoryError::NotFound { id } => {
            Error::not_found(format!("content row {id} not found"))
        }
    }
}

#[derive(Clone)]
pub struct SingletonContentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SingletonContentService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> SingletonContentService<R>
where
    R: SingletonRepository,
{
    /// Validate and persist a singleton row.
    ///
    /// An active row deactivates its siblings in the same transaction, so
    /// after commit it is the only active row of its kind. An inactive row is
    /// stored without touching siblings.
    pub async fn save(&self, write: SingletonWrite) -> Result<SingletonRecord, Error> {
        let SingletonWrite { target, draft } = write;
        let kind = draft.kind();
        let (id, mode) = match target {
            WriteTarget::Create => (Uuid::new_v4(), WriteMode::Insert),
            WriteTarget::Update(id) => (id, WriteMode::Update),
        };
        let record = draft.into_record(id, self.clock.utc()).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": err.field(),
                "code": "invalid_field",
            }))
        })?;

        self.repo
            .save_exclusive(&record, mode)
            .await
            .map_err(map_repository_error)?;

        info!(
            kind = kind.as_str(),
            id = %record.id(),
            active = record.is_active(),
            "singleton content saved"
        );
        Ok(record)
    }

    /// Rows of `kind` after applying the admin filter.
    pub async fn list(
        &self,
        kind: SingletonKind,
        filter: &ListFilter,
    ) -> Result<Vec<SingletonRecord>, Error> {
        let entity = entity_kind(kind);
        filter
            .supported_by(entity)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let rows = self.repo.list(kind).await.map_err(map_repository_error)?;
        Ok(filter.apply(entity, rows))
    }
}

#[async_trait]
impl<R> SingletonContentCommand for SingletonContentService<R>
where
    R: SingletonRepository,
{
    async fn save(&self, write: SingletonWrite) -> Result<SingletonRecord, Error> {
        SingletonContentService::save(self, write).await
    }

    async fn list(
        &self,
        kind: SingletonKind,
        filter: &ListFilter,
    ) -> Result<Vec<SingletonRecord>, Error> {
        SingletonContentService::list(self, kind, filter).await
    }
}

#[cfg(test)]
#[path = "singleton_content_tests.rs"]
mod tests;
