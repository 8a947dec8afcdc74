//! PostgreSQL-backed `CatalogueRepository`.
//!
//! Deletions lean on the schema's foreign keys: `ON DELETE SET NULL` keeps
//! skills of a deleted group and items or links of a deleted contact, while
//! `project_skills` cascades from both sides. A project write and its link
//! replacement share one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::error_mapping::{foreign_key_violation_field, map_diesel_error, map_pool_error};
use super::models::{
    ContactRow, FooterRow, InfoItemRow, ProjectChanges, ProjectRow, ProjectSkillRow, SectionsRow,
    SkillGroupRow, SkillRow, SocialLinkRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    contacts, footers, info_items, project_skills, projects, sections, skill_groups, skills,
    social_links,
};
use crate::domain::content::{CatalogueKind, CatalogueRecord, ProjectRecord};
use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError, WriteMode};

/// Foreign key columns and the draft field each one reports as.
const REFERENCES: [(&str, &str); 3] = [
    ("group_id", "groupId"),
    ("contact_id", "contactId"),
    ("skill_id", "skillIds"),
];

/// Diesel-backed store for the multi-row catalogue.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CatalogueRepositoryError {
    map_pool_error(error, CatalogueRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> CatalogueRepositoryError {
    let columns = REFERENCES.map(|(column, _)| column);
    if let Some(column) = foreign_key_violation_field(&error, &columns) {
        let field = REFERENCES
            .iter()
            .find(|(known, _)| *known == column)
            .map_or(column, |(_, field)| *field);
        return CatalogueRepositoryError::missing_reference(field);
    }
    map_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

/// Transaction failure: either the store failed or the update matched no row.
enum WriteFailure {
    Store(DieselError),
    Missing(Uuid),
}

impl From<DieselError> for WriteFailure {
    fn from(error: DieselError) -> Self {
        Self::Store(error)
    }
}

impl From<WriteFailure> for CatalogueRepositoryError {
    fn from(failure: WriteFailure) -> Self {
        match failure {
            WriteFailure::Store(error) => map_diesel(error),
            WriteFailure::Missing(id) => Self::not_found(id),
        }
    }
}

/// Generates `write_<table>` and `delete_<table>` for one catalogue table.
macro_rules! catalogue_table_ops {
    ($table:ident, $row:ty) => {
        paste::paste! {
            async fn [<write_ $table>](
                conn: &mut AsyncPgConnection,
                row: &$row,
                mode: WriteMode,
            ) -> Result<usize, DieselError> {
                match mode {
                    WriteMode::Insert => {
                        diesel::insert_into($table::table)
                            .values(row)
                            .execute(conn)
                            .await
                    }
                    WriteMode::Update => {
                        diesel::update($table::table.find(row.id))
                            .set(row)
                            .execute(conn)
                            .await
                    }
                }
            }

            async fn [<delete_ $table>](
                conn: &mut AsyncPgConnection,
                id: Uuid,
            ) -> Result<usize, DieselError> {
                diesel::delete($table::table.find(id)).execute(conn).await
            }
        }
    };
}

catalogue_table_ops!(skill_groups, SkillGroupRow);
catalogue_table_ops!(skills, SkillRow);
catalogue_table_ops!(contacts, ContactRow);
catalogue_table_ops!(info_items, InfoItemRow);
catalogue_table_ops!(social_links, SocialLinkRow);
catalogue_table_ops!(sections, SectionsRow);
catalogue_table_ops!(footers, FooterRow);

async fn delete_projects(conn: &mut AsyncPgConnection, id: Uuid) -> Result<usize, DieselError> {
    diesel::delete(projects::table.find(id)).execute(conn).await
}

/// Write the project row and replace its skill links.
async fn write_project(
    conn: &mut AsyncPgConnection,
    record: &ProjectRecord,
    mode: WriteMode,
) -> Result<Option<CatalogueRecord>, DieselError> {
    let (project, skill_ids) = record.clone().into_parts();
    let stored = match mode {
        WriteMode::Insert => {
            diesel::insert_into(projects::table)
                .values(ProjectRow::from(&project))
                .returning(ProjectRow::as_returning())
                .get_result(conn)
                .await
                .optional()?
        }
        WriteMode::Update => {
            diesel::update(projects::table.find(project.id))
                .set(ProjectChanges::from(&project))
                .returning(ProjectRow::as_returning())
                .get_result(conn)
                .await
                .optional()?
        }
    };
    let Some(stored) = stored else {
        return Ok(None);
    };

    diesel::delete(project_skills::table.filter(project_skills::project_id.eq(stored.id)))
        .execute(conn)
        .await?;
    let links: Vec<ProjectSkillRow> = skill_ids
        .iter()
        .map(|skill_id| ProjectSkillRow {
            project_id: stored.id,
            skill_id: *skill_id,
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_into(project_skills::table)
            .values(&links)
            .execute(conn)
            .await?;
    }
    Ok(Some(CatalogueRecord::Project(ProjectRecord::from_parts(
        stored.into_project(Vec::new()),
        skill_ids,
    ))))
}

async fn write_record(
    conn: &mut AsyncPgConnection,
    record: &CatalogueRecord,
    mode: WriteMode,
) -> Result<Option<CatalogueRecord>, DieselError> {
    let written = match record {
        CatalogueRecord::SkillGroup(row) => {
            write_skill_groups(conn, &SkillGroupRow::from(row), mode).await?
        }
        CatalogueRecord::Skill(row) => write_skills(conn, &SkillRow::from(row), mode).await?,
        CatalogueRecord::Project(row) => return write_project(conn, row, mode).await,
        CatalogueRecord::Contact(row) => write_contacts(conn, &ContactRow::from(row), mode).await?,
        CatalogueRecord::InfoItem(row) => {
            write_info_items(conn, &InfoItemRow::from(row), mode).await?
        }
        CatalogueRecord::SocialLink(row) => {
            write_social_links(conn, &SocialLinkRow::from(row), mode).await?
        }
        CatalogueRecord::Sections(row) => {
            write_sections(conn, &SectionsRow::from(row), mode).await?
        }
        CatalogueRecord::Footer(row) => write_footers(conn, &FooterRow::from(row), mode).await?,
    };
    Ok((written > 0).then(|| record.clone()))
}

async fn load_projects(conn: &mut AsyncPgConnection) -> Result<Vec<CatalogueRecord>, DieselError> {
    let rows: Vec<ProjectRow> = projects::table
        .select(ProjectRow::as_select())
        .order_by((
            projects::ordering_index.asc().nulls_last(),
            projects::created.desc(),
            projects::id,
        ))
        .load(conn)
        .await?;
    let links: Vec<(Uuid, Uuid)> = project_skills::table
        .select((project_skills::project_id, project_skills::skill_id))
        .order_by((project_skills::project_id, project_skills::skill_id))
        .load(conn)
        .await?;

    let mut by_project: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (project_id, skill_id) in links {
        by_project.entry(project_id).or_default().push(skill_id);
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let skill_ids = by_project.remove(&row.id).unwrap_or_default();
            CatalogueRecord::Project(ProjectRecord::from_parts(
                row.into_project(Vec::new()),
                skill_ids,
            ))
        })
        .collect())
}

async fn load_kind(
    conn: &mut AsyncPgConnection,
    kind: CatalogueKind,
) -> Result<Vec<CatalogueRecord>, DieselError> {
    Ok(match kind {
        CatalogueKind::SkillGroup => skill_groups::table
            .select(SkillGroupRow::as_select())
            .order_by((skill_groups::title.asc().nulls_last(), skill_groups::id))
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::SkillGroup(r.into()))
            .collect(),
        CatalogueKind::Skill => skills::table
            .select(SkillRow::as_select())
            .order_by((skills::title.asc().nulls_last(), skills::id))
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::Skill(r.into()))
            .collect(),
        CatalogueKind::Project => load_projects(conn).await?,
        CatalogueKind::Contact => contacts::table
            .select(ContactRow::as_select())
            .order_by((contacts::title.asc().nulls_last(), contacts::id))
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::Contact(r.into()))
            .collect(),
        CatalogueKind::InfoItem => info_items::table
            .select(InfoItemRow::as_select())
            .order_by((info_items::key.asc().nulls_last(), info_items::id))
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::InfoItem(r.into()))
            .collect(),
        CatalogueKind::SocialLink => social_links::table
            .select(SocialLinkRow::as_select())
            .order_by((social_links::title.asc().nulls_last(), social_links::id))
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::SocialLink(r.into()))
            .collect(),
        CatalogueKind::Sections => sections::table
            .select(SectionsRow::as_select())
            .order_by(sections::id)
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::Sections(r.into()))
            .collect(),
        CatalogueKind::Footer => footers::table
            .select(FooterRow::as_select())
            .order_by(footers::id)
            .load(conn)
            .await?
            .into_iter()
            .map(|r| CatalogueRecord::Footer(r.into()))
            .collect(),
    })
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn save(
        &self,
        record: &CatalogueRecord,
        mode: WriteMode,
    ) -> Result<CatalogueRecord, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        conn.transaction(|conn| {
            async move {
                write_record(conn, record, mode)
                    .await?
                    .ok_or(WriteFailure::Missing(record.id()))
            }
            .scope_boxed()
        })
        .await
        .map_err(CatalogueRepositoryError::from)
    }

    async fn list(
        &self,
        kind: CatalogueKind,
    ) -> Result<Vec<CatalogueRecord>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        load_kind(&mut conn, kind).await.map_err(map_diesel)
    }

    async fn delete(&self, kind: CatalogueKind, id: Uuid) -> Result<(), CatalogueRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let deleted = match kind {
            CatalogueKind::SkillGroup => delete_skill_groups(conn, id).await,
            CatalogueKind::Skill => delete_skills(conn, id).await,
            CatalogueKind::Project => delete_projects(conn, id).await,
            CatalogueKind::Contact => delete_contacts(conn, id).await,
            CatalogueKind::InfoItem => delete_info_items(conn, id).await,
            CatalogueKind::SocialLink => delete_social_links(conn, id).await,
            CatalogueKind::Sections => delete_sections(conn, id).await,
            CatalogueKind::Footer => delete_footers(conn, id).await,
        }
        .map_err(map_diesel)?;
        if deleted == 0 {
            return Err(CatalogueRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    fn missing_row_becomes_not_found() {
        let id = Uuid::new_v4();
        let error = CatalogueRepositoryError::from(WriteFailure::Missing(id));
        assert_eq!(error, CatalogueRepositoryError::not_found(id));
    }

    #[rstest]
    fn unnamed_foreign_key_violations_fall_back_to_query() {
        // A boxed String carries no constraint name.
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert violates foreign key".to_owned()),
        );
        assert!(matches!(map_diesel(error), CatalogueRepositoryError::Query { .. }));
    }

    #[rstest]
    fn every_reference_reports_a_camel_case_field() {
        for (column, field) in REFERENCES {
            assert!(!field.contains('_'), "{column} reports {field}");
        }
    }
}
