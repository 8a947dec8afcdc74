//! Driven port returning everything the public page needs in one read.

use async_trait::async_trait;

use crate::domain::content::{
    About, ContactWithItems, Footer, Hero, MetaData, Project, Sections, SkillGroupWithSkills,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading page content.
    pub enum ContentRepositoryError {
        /// Connection or pool checkout failed.
        Connection { message: String } => "content repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "content repository query failed: {message}",
    }
}

/// Outcome of one field of the page read.
pub type FieldRead<T> = Result<T, ContentRepositoryError>;

/// Page content read inside one snapshot.
///
/// Each field carries its own result: a failing query for one entity type
/// does not discard the others.
#[derive(Debug, Clone)]
pub struct PageContentSnapshot {
    pub metadata: FieldRead<Option<MetaData>>,
    pub hero: FieldRead<Option<Hero>>,
    pub about: FieldRead<Option<About>>,
    /// Active groups ordered by title, each with its active skills.
    pub skill_groups: FieldRead<Vec<SkillGroupWithSkills>>,
    /// Active projects with their active skills, in storage order.
    pub projects: FieldRead<Vec<Project>>,
    /// First active contact by title with its active items and links.
    pub contact: FieldRead<Option<ContactWithItems>>,
    pub sections: FieldRead<Option<Sections>>,
    pub footer: FieldRead<Option<Footer>>,
}

impl PageContentSnapshot {
    /// A snapshot where every field holds its empty value.
    pub fn empty() -> Self {
        Self {
            metadata: Ok(None),
            hero: Ok(None),
            about: Ok(None),
            skill_groups: Ok(Vec::new()),
            projects: Ok(Vec::new()),
            contact: Ok(None),
            sections: Ok(None),
            footer: Ok(None),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageContentRepository: Send + Sync {
    /// Read all page content from one consistent snapshot.
    ///
    /// The outer error means no snapshot could be opened at all; per-entity
    /// failures are reported inside [`PageContentSnapshot`].
    async fn page_snapshot(&self) -> Result<PageContentSnapshot, ContentRepositoryError>;
}
