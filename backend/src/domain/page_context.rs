//! Public page read model.
//!
//! [`PageContextService::build`] turns one repository snapshot into the
//! render context. Each field degrades on its own: a failed read is logged
//! and rendered as absent, the rest of the page still renders.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::content::{
    About, ContactWithItems, Footer, Hero, MetaData, Project, Sections, SkillGroupWithSkills,
};
use crate::domain::ports::{FieldRead, PageContentRepository, PageContextQuery};

/// Everything the page template needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub metadata: Option<MetaData>,
    pub hero: Option<Hero>,
    pub about: Option<About>,
    pub skill_groups: Vec<SkillGroupWithSkills>,
    pub projects: Vec<Project>,
    pub contact: Option<ContactWithItems>,
    pub sections: Option<Sections>,
    pub footer: Option<Footer>,
}

fn compare_projects(a: &Project, b: &Project) -> Ordering {
    let by_index = match (a.ordering_index, b.ordering_index) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_index
        .then_with(|| b.created.cmp(&a.created))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort projects for display: `ordering_index` ascending with unset indexes
/// last, then newest first, then by id.
pub fn order_projects(projects: &mut [Project]) {
    projects.sort_by(compare_projects);
}

fn degrade<T: Default>(field: &'static str, read: FieldRead<T>) -> T {
    read.unwrap_or_else(|error| {
        warn!(field, %error, "page content read failed; rendering without it");
        T::default()
    })
}

#[derive(Clone)]
pub struct PageContextService<R> {
    repo: Arc<R>,
}

impl<R> PageContextService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> PageContextService<R>
where
    R: PageContentRepository,
{
    /// Assemble the page context. Never fails and never writes.
    pub async fn build(&self) -> PageContext {
        let snapshot = match self.repo.page_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "page content unavailable; rendering an empty page");
                return PageContext::default();
            }
        };

        let mut projects = degrade("projects", snapshot.projects);
        order_projects(&mut projects);

        PageContext {
            metadata: degrade("metadata", snapshot.metadata),
            hero: degrade("hero", snapshot.hero),
            about: degrade("about", snapshot.about),
            skill_groups: degrade("skill_groups", snapshot.skill_groups),
            projects,
            contact: degrade("contact", snapshot.contact),
            sections: degrade("sections", snapshot.sections),
            footer: degrade("footer", snapshot.footer),
        }
    }
}

#[async_trait]
impl<R> PageContextQuery for PageContextService<R>
where
    R: PageContentRepository,
{
    async fn page_context(&self) -> PageContext {
        self.build().await
    }
}

#[cfg(test)]
#[path = "page_context_tests.rs"]
mod tests;
