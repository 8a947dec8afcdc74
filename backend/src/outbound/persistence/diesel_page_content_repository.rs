//! PostgreSQL-backed `PageContentRepository`.
//!
//! All page reads share one read-only `REPEATABLE READ` transaction, so the
//! page never mixes rows from before and after a concurrent activation. Each
//! field runs inside its own savepoint: a failing query is rolled back to
//! that savepoint and reported for that field alone.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::{ScopedBoxFuture, ScopedFutureExt as _};
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    AboutRow, ContactRow, FooterRow, HeroRow, InfoItemRow, MetaDataRow, ProjectRow, SectionsRow,
    SkillGroupRow, SkillRow, SocialLinkRow,
};
use super::pool::DbPool;
use super::schema::{
    abouts, contacts, footers, heroes, info_items, metadata, project_skills, projects, sections,
    skill_groups, skills, social_links,
};
use crate::domain::content::{
    About, ContactWithItems, Footer, Hero, MetaData, Project, Sections, Skill,
    SkillGroupWithSkills,
};
use crate::domain::ports::{
    ContentRepositoryError, FieldRead, PageContentRepository, PageContentSnapshot,
};

/// Diesel-backed read model for the public page.
#[derive(Clone)]
pub struct DieselPageContentRepository {
    pool: DbPool,
}

impl DieselPageContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel(error: DieselError) -> ContentRepositoryError {
    map_diesel_error(
        error,
        ContentRepositoryError::query,
        ContentRepositoryError::connection,
    )
}

/// Run one field's queries in a savepoint and capture the outcome.
async fn read_field<T, F>(conn: &mut AsyncPgConnection, read: F) -> FieldRead<T>
where
    T: Send + 'static,
    F: for<'r> FnOnce(
            &'r mut AsyncPgConnection,
        ) -> ScopedBoxFuture<'static, 'r, Result<T, DieselError>>
        + Send
        + 'static,
{
    conn.transaction(read).await.map_err(map_diesel)
}

async fn load_metadata(conn: &mut AsyncPgConnection) -> Result<Option<MetaData>, DieselError> {
    metadata::table
        .filter(metadata::is_active.eq(true))
        .select(MetaDataRow::as_select())
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(Into::into))
}

async fn load_hero(conn: &mut AsyncPgConnection) -> Result<Option<Hero>, DieselError> {
    heroes::table
        .filter(heroes::is_active.eq(true))
        .select(HeroRow::as_select())
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(Into::into))
}

async fn load_about(conn: &mut AsyncPgConnection) -> Result<Option<About>, DieselError> {
    abouts::table
        .filter(abouts::is_active.eq(true))
        .select(AboutRow::as_select())
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(Into::into))
}

async fn load_skill_groups(
    conn: &mut AsyncPgConnection,
) -> Result<Vec<SkillGroupWithSkills>, DieselError> {
    let groups: Vec<SkillGroupRow> = skill_groups::table
        .filter(skill_groups::is_active.eq(true))
        .select(SkillGroupRow::as_select())
        .order_by((skill_groups::title.asc().nulls_last(), skill_groups::id))
        .load(conn)
        .await?;
    let group_ids: Vec<Uuid> = groups.iter().map(|g| g.id).collect();
    let members: Vec<SkillRow> = skills::table
        .filter(skills::is_active.eq(true))
        .filter(skills::group_id.eq_any(&group_ids))
        .select(SkillRow::as_select())
        .order_by((skills::title.asc().nulls_last(), skills::id))
        .load(conn)
        .await?;

    let mut by_group: HashMap<Uuid, Vec<Skill>> = HashMap::new();
    for row in members {
        if let Some(group_id) = row.group_id {
            by_group.entry(group_id).or_default().push(row.into());
        }
    }
    Ok(groups
        .into_iter()
        .map(|group| SkillGroupWithSkills {
            skills: by_group.remove(&group.id).unwrap_or_default(),
            group: group.into(),
        })
        .collect())
}

async fn load_projects(conn: &mut AsyncPgConnection) -> Result<Vec<Project>, DieselError> {
    let rows: Vec<ProjectRow> = projects::table
        .filter(projects::is_active.eq(true))
        .select(ProjectRow::as_select())
        .order_by((
            projects::ordering_index.asc().nulls_last(),
            projects::created.desc(),
            projects::id,
        ))
        .load(conn)
        .await?;
    let project_ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();
    let links: Vec<(Uuid, SkillRow)> = project_skills::table
        .inner_join(skills::table)
        .filter(project_skills::project_id.eq_any(&project_ids))
        .filter(skills::is_active.eq(true))
        .select((project_skills::project_id, SkillRow::as_select()))
        .order_by((skills::title.asc().nulls_last(), skills::id))
        .load(conn)
        .await?;

    let mut by_project: HashMap<Uuid, Vec<Skill>> = HashMap::new();
    for (project_id, skill) in links {
        by_project.entry(project_id).or_default().push(skill.into());
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let skills = by_project.remove(&row.id).unwrap_or_default();
            row.into_project(skills)
        })
        .collect())
}

async fn load_contact(
    conn: &mut AsyncPgConnection,
) -> Result<Option<ContactWithItems>, DieselError> {
    let Some(contact) = contacts::table
        .filter(contacts::is_active.eq(true))
        .select(ContactRow::as_select())
        .order_by((contacts::title.asc().nulls_last(), contacts::id))
        .first(conn)
        .await
        .optional()?
    else {
        return Ok(None);
    };
    let info: Vec<InfoItemRow> = info_items::table
        .filter(info_items::is_active.eq(true))
        .filter(info_items::contact_id.eq(contact.id))
        .select(InfoItemRow::as_select())
        .order_by((info_items::key.asc().nulls_last(), info_items::id))
        .load(conn)
        .await?;
    let links: Vec<SocialLinkRow> = social_links::table
        .filter(social_links::is_active.eq(true))
        .filter(social_links::contact_id.eq(contact.id))
        .select(SocialLinkRow::as_select())
        .order_by((social_links::title.asc().nulls_last(), social_links::id))
        .load(conn)
        .await?;
    Ok(Some(ContactWithItems {
        contact: contact.into(),
        info_items: info.into_iter().map(Into::into).collect(),
        social_links: links.into_iter().map(Into::into).collect(),
    }))
}

async fn load_sections(conn: &mut AsyncPgConnection) -> Result<Option<Sections>, DieselError> {
    sections::table
        .select(SectionsRow::as_select())
        .order_by(sections::id)
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(Into::into))
}

async fn load_footer(conn: &mut AsyncPgConnection) -> Result<Option<Footer>, DieselError> {
    footers::table
        .select(FooterRow::as_select())
        .order_by(footers::id)
        .first(conn)
        .await
        .optional()
        .map(|row| row.map(Into::into))
}

async fn read_snapshot(conn: &mut AsyncPgConnection) -> PageContentSnapshot {
    PageContentSnapshot {
        metadata: read_field(conn, |c| load_metadata(c).scope_boxed()).await,
        hero: read_field(conn, |c| load_hero(c).scope_boxed()).await,
        about: read_field(conn, |c| load_about(c).scope_boxed()).await,
        skill_groups: read_field(conn, |c| load_skill_groups(c).scope_boxed()).await,
        projects: read_field(conn, |c| load_projects(c).scope_boxed()).await,
        contact: read_field(conn, |c| load_contact(c).scope_boxed()).await,
        sections: read_field(conn, |c| load_sections(c).scope_boxed()).await,
        footer: read_field(conn, |c| load_footer(c).scope_boxed()).await,
    }
}

#[async_trait]
impl PageContentRepository for DieselPageContentRepository {
    async fn page_snapshot(&self) -> Result<PageContentSnapshot, ContentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContentRepositoryError::connection))?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move { Ok::<_, DieselError>(read_snapshot(conn).await) }.scope_boxed()
            })
            .await
            .map_err(map_diesel)
    }
}
