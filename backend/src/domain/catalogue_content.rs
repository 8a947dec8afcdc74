//! Write, list and delete path for catalogue content.
//!
//! Catalogue rows carry no single-active rule; the service validates drafts,
//! assigns identities and translates repository failures, including foreign
//! keys that name missing rows.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::admin::ListFilter;
use crate::domain::content::{CatalogueDraft, CatalogueKind, CatalogueRecord};
use crate::domain::ports::{
    CatalogueContentCommand, CatalogueRepository, CatalogueRepositoryError, WriteMode,
};
use crate::domain::{Error, WriteTarget};

/// A create-or-update request for one catalogue row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueWrite {
    pub target: WriteTarget,
    pub draft: CatalogueDraft,
}

fn map_repository_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("content store unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("content store error: {message}"))
        }
        CatalogueRepositoryError::NotFound { id } => {
            Error::not_found(format!("content row {id} not found"))
        }
        CatalogueRepositoryError::MissingReference { field } => {
            Error::invalid_request(format!("{field} refers to a missing row"))
                .with_details(json!({ "field": field, "code": "unknown_reference" }))
        }
    }
}

#[derive(Clone)]
pub struct CatalogueContentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CatalogueContentService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> CatalogueContentService<R>
where
    R: CatalogueRepository,
{
    /// Validate and persist a catalogue row, returning it as stored.
    pub async fn save(&self, write: CatalogueWrite) -> Result<CatalogueRecord, Error> {
        let CatalogueWrite { target, draft } = write;
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

        let stored = self
            .repo
            .save(&record, mode)
            .await
            .map_err(map_repository_error)?;
        info!(kind = kind.as_str(), id = %stored.id(), "catalogue content saved");
        Ok(stored)
    }

    /// Rows of `kind` after applying the admin filter.
    pub async fn list(
        &self,
        kind: CatalogueKind,
        filter: &ListFilter,
    ) -> Result<Vec<CatalogueRecord>, Error> {
        let entity = kind.entity_kind();
        filter
            .supported_by(entity)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let rows = self.repo.list(kind).await.map_err(map_repository_error)?;
        Ok(filter.apply(entity, rows))
    }

    pub async fn delete(&self, kind: CatalogueKind, id: Uuid) -> Result<(), Error> {
        self.repo
            .delete(kind, id)
            .await
            .map_err(map_repository_error)?;
        info!(kind = kind.as_str(), %id, "catalogue content deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> CatalogueContentCommand for CatalogueContentService<R>
where
    R: CatalogueRepository,
{
    async fn save(&self, write: CatalogueWrite) -> Result<CatalogueRecord, Error> {
        CatalogueContentService::save(self, write).await
    }

    async fn list(
        &self,
        kind: CatalogueKind,
        filter: &ListFilter,
    ) -> Result<Vec<CatalogueRecord>, Error> {
        CatalogueContentService::list(self, kind, filter).await
    }

    async fn delete(&self, kind: CatalogueKind, id: Uuid) -> Result<(), Error> {
        CatalogueContentService::delete(self, kind, id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::admin::{Listable, StatusFilter};
    use crate::domain::content::{ProjectDraft, SkillDraft, SkillGroupDraft};
    use crate::domain::ports::MockCatalogueRepository;
    use crate::domain::test_support::{fixture_clock, fixture_timestamp};

    fn skill_write(target: WriteTarget, title: &str) -> CatalogueWrite {
        CatalogueWrite {
            target,
            draft: CatalogueDraft::Skill(SkillDraft {
                title: Some(title.to_owned()),
                ..SkillDraft::default()
            }),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_the_stored_record() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_save()
            .with(always(), eq(WriteMode::Insert))
            .times(1)
            .return_once(|record, _| Ok(record.clone()));
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let record = service
            .save(skill_write(WriteTarget::Create, " Rust "))
            .await
            .expect("saved");
        match record {
            CatalogueRecord::Skill(skill) => {
                assert_eq!(skill.title.as_deref(), Some("Rust"));
                assert!(skill.is_active);
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn new_projects_take_the_clock_as_creation_time() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_save()
            .times(1)
            .return_once(|record, _| Ok(record.clone()));
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let record = service
            .save(CatalogueWrite {
                target: WriteTarget::Create,
                draft: CatalogueDraft::Project(ProjectDraft::default()),
            })
            .await
            .expect("saved");
        let CatalogueRecord::Project(project) = record else {
            panic!("expected a project");
        };
        assert_eq!(project.created, fixture_timestamp());
    }

    #[rstest]
    #[case(CatalogueRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogueRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(CatalogueRepositoryError::not_found(Uuid::nil()), ErrorCode::NotFound)]
    #[case(CatalogueRepositoryError::missing_reference("groupId"), ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn repository_errors_map_to_domain_codes(
        #[case] failure: CatalogueRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_save()
            .times(1)
            .return_once(move |_, _| Err(failure));
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let err = service
            .save(skill_write(WriteTarget::Update(Uuid::nil()), "Rust"))
            .await
            .expect_err("store failure");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_references_name_the_field() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_save()
            .return_once(|_, _| Err(CatalogueRepositoryError::missing_reference("groupId")));
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let err = service
            .save(skill_write(WriteTarget::Create, "Rust"))
            .await
            .expect_err("dangling group");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "groupId");
        assert_eq!(details["code"], "unknown_reference");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_drafts_never_reach_the_repository() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_save().never();
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let err = service
            .save(CatalogueWrite {
                target: WriteTarget::Create,
                draft: CatalogueDraft::SkillGroup(SkillGroupDraft {
                    title: Some("g".repeat(300)),
                    is_active: true,
                }),
            })
            .await
            .expect_err("invalid title");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some("title"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_applies_status_filter() {
        let clock = fixture_clock();
        let active = skill_write(WriteTarget::Create, "Rust")
            .draft
            .into_record(Uuid::new_v4(), clock.utc())
            .expect("valid");
        let inactive = CatalogueDraft::Skill(SkillDraft {
            title: Some("Cobol".into()),
            is_active: false,
            ..SkillDraft::default()
        })
        .into_record(Uuid::new_v4(), clock.utc())
        .expect("valid");
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list()
            .with(eq(CatalogueKind::Skill))
            .times(1)
            .return_once(move |_| Ok(vec![active, inactive]));
        let service = CatalogueContentService::new(Arc::new(repo), clock);

        let filter = ListFilter {
            status: Some(StatusFilter::Inactive),
            ..ListFilter::default()
        };
        let rows = service.list(CatalogueKind::Skill, &filter).await.expect("listed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field_text("title"), Some("Cobol"));
    }

    #[rstest]
    #[tokio::test]
    async fn status_filter_is_rejected_for_footers() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list().never();
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let filter = ListFilter {
            status: Some(StatusFilter::Active),
            ..ListFilter::default()
        };
        let err = service
            .list(CatalogueKind::Footer, &filter)
            .await
            .expect_err("footers have no active flag");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_missing_row_is_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockCatalogueRepository::new();
        repo.expect_delete()
            .with(eq(CatalogueKind::Contact), eq(id))
            .times(1)
            .return_once(move |_, id| Err(CatalogueRepositoryError::not_found(id)));
        let service = CatalogueContentService::new(Arc::new(repo), fixture_clock());

        let err = service
            .delete(CatalogueKind::Contact, id)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
