//! Administrative write model for the multi-row catalogue: skill groups,
//! skills, projects, contact details, section toggles and footers.
//!
//! Drafts arrive from the admin API, are normalised by `from_draft` and
//! become a [`CatalogueRecord`] the repository stores verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::admin::{EntityKind, Listable};

use super::catalogue::{
    Contact, DEFAULT_SOURCE_URL, Footer, InfoItem, Project, Sections, Skill, SkillGroup,
    SocialLink,
};
use super::text::{
    ContentValidationError, SHORT_TEXT_MAX, bounded_text, optional_text, optional_url,
};

fn default_true() -> bool {
    true
}

fn default_source_url() -> Option<String> {
    Some(DEFAULT_SOURCE_URL.to_owned())
}

/// Catalogue entity types editable through the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueKind {
    SkillGroup,
    Skill,
    Project,
    Contact,
    InfoItem,
    SocialLink,
    Sections,
    Footer,
}

impl CatalogueKind {
    pub const ALL: [Self; 8] = [
        Self::SkillGroup,
        Self::Skill,
        Self::Project,
        Self::Contact,
        Self::InfoItem,
        Self::SocialLink,
        Self::Sections,
        Self::Footer,
    ];

    /// Stable key used for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SkillGroup => "skill_group",
            Self::Skill => "skill",
            Self::Project => "project",
            Self::Contact => "contact",
            Self::InfoItem => "info_item",
            Self::SocialLink => "social_link",
            Self::Sections => "sections",
            Self::Footer => "footer",
        }
    }

    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::SkillGroup => EntityKind::SkillGroup,
            Self::Skill => EntityKind::Skill,
            Self::Project => EntityKind::Project,
            Self::Contact => EntityKind::Contact,
            Self::InfoItem => EntityKind::InfoItem,
            Self::SocialLink => EntityKind::SocialLink,
            Self::Sections => EntityKind::Sections,
            Self::Footer => EntityKind::Footer,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroupDraft {
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    pub title: Option<String>,
    /// HTML snippet or CSS class.
    pub icon: Option<String>,
    pub group_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Incoming project fields. A missing `sourceUrl` takes
/// [`DEFAULT_SOURCE_URL`]; an explicit `null` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default = "default_source_url")]
    pub source_url: Option<String>,
    pub ordering_index: Option<i32>,
    #[serde(default)]
    pub skill_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            image: None,
            demo_url: None,
            source_url: default_source_url(),
            ordering_index: None,
            skill_ids: Vec::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoItemDraft {
    pub key: Option<String>,
    pub value: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub contact_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkDraft {
    pub title: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub contact_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Section toggles; an omitted toggle shows its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionsDraft {
    #[serde(default = "default_true")]
    pub about_me: bool,
    #[serde(default = "default_true")]
    pub projects: bool,
    #[serde(default = "default_true")]
    pub skills: bool,
    #[serde(default = "default_true")]
    pub process: bool,
    #[serde(default = "default_true")]
    pub contact: bool,
}

impl Default for SectionsDraft {
    fn default() -> Self {
        Self {
            about_me: true,
            projects: true,
            skills: true,
            process: true,
            contact: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterDraft {
    pub copyright_text: Option<String>,
}

/// Admin view of a project: its columns plus the ids of linked skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub demo_url: Option<String>,
    pub source_url: Option<String>,
    pub ordering_index: Option<i32>,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    pub skill_ids: Vec<Uuid>,
}

impl ProjectRecord {
    /// Validate `draft`. Duplicate skill ids collapse to one link.
    pub fn from_draft(
        id: Uuid,
        draft: ProjectDraft,
        created: DateTime<Utc>,
    ) -> Result<Self, ContentValidationError> {
        let mut skill_ids = draft.skill_ids;
        skill_ids.sort_unstable();
        skill_ids.dedup();
        Ok(Self {
            id,
            title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
            description: optional_text(draft.description),
            image: bounded_text("image", draft.image, SHORT_TEXT_MAX)?,
            demo_url: optional_url("demoUrl", draft.demo_url)?,
            source_url: optional_url("sourceUrl", draft.source_url)?,
            ordering_index: draft.ordering_index,
            is_active: draft.is_active,
            created,
            skill_ids,
        })
    }

    /// Project columns without skills, plus the link targets.
    pub fn into_parts(self) -> (Project, Vec<Uuid>) {
        let project = Project {
            id: self.id,
            title: self.title,
            description: self.description,
            image: self.image,
            demo_url: self.demo_url,
            source_url: self.source_url,
            ordering_index: self.ordering_index,
            is_active: self.is_active,
            created: self.created,
            skills: Vec::new(),
        };
        (project, self.skill_ids)
    }

    pub fn from_parts(project: Project, skill_ids: Vec<Uuid>) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            image: project.image,
            demo_url: project.demo_url,
            source_url: project.source_url,
            ordering_index: project.ordering_index,
            is_active: project.is_active,
            created: project.created,
            skill_ids,
        }
    }
}

/// A draft for any catalogue kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueDraft {
    SkillGroup(SkillGroupDraft),
    Skill(SkillDraft),
    Project(ProjectDraft),
    Contact(ContactDraft),
    InfoItem(InfoItemDraft),
    SocialLink(SocialLinkDraft),
    Sections(SectionsDraft),
    Footer(FooterDraft),
}

impl CatalogueDraft {
    pub fn kind(&self) -> CatalogueKind {
        match self {
            Self::SkillGroup(_) => CatalogueKind::SkillGroup,
            Self::Skill(_) => CatalogueKind::Skill,
            Self::Project(_) => CatalogueKind::Project,
            Self::Contact(_) => CatalogueKind::Contact,
            Self::InfoItem(_) => CatalogueKind::InfoItem,
            Self::SocialLink(_) => CatalogueKind::SocialLink,
            Self::Sections(_) => CatalogueKind::Sections,
            Self::Footer(_) => CatalogueKind::Footer,
        }
    }

    /// Validate the draft into a record with the given identity.
    ///
    /// `now` only lands on projects, as their creation time; updates keep
    /// the stored one.
    pub fn into_record(
        self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CatalogueRecord, ContentValidationError> {
        Ok(match self {
            Self::SkillGroup(draft) => CatalogueRecord::SkillGroup(SkillGroup {
                id,
                title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
                is_active: draft.is_active,
            }),
            Self::Skill(draft) => CatalogueRecord::Skill(Skill {
                id,
                title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
                icon: optional_text(draft.icon),
                group_id: draft.group_id,
                is_active: draft.is_active,
            }),
            Self::Project(draft) => {
                CatalogueRecord::Project(ProjectRecord::from_draft(id, draft, now)?)
            }
            Self::Contact(draft) => CatalogueRecord::Contact(Contact {
                id,
                title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
                description: optional_text(draft.description),
                is_active: draft.is_active,
            }),
            Self::InfoItem(draft) => CatalogueRecord::InfoItem(InfoItem {
                id,
                key: bounded_text("key", draft.key, SHORT_TEXT_MAX)?,
                value: optional_text(draft.value),
                link: optional_url("link", draft.link)?,
                icon: optional_text(draft.icon),
                contact_id: draft.contact_id,
                is_active: draft.is_active,
            }),
            Self::SocialLink(draft) => CatalogueRecord::SocialLink(SocialLink {
                id,
                title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
                link: optional_url("link", draft.link)?,
                icon: optional_text(draft.icon),
                contact_id: draft.contact_id,
                is_active: draft.is_active,
            }),
            Self::Sections(draft) => CatalogueRecord::Sections(Sections {
                id,
                about_me: draft.about_me,
                projects: draft.projects,
                skills: draft.skills,
                process: draft.process,
                contact: draft.contact,
            }),
            Self::Footer(draft) => CatalogueRecord::Footer(Footer {
                id,
                copyright_text: bounded_text(
                    "copyrightText",
                    draft.copyright_text,
                    SHORT_TEXT_MAX,
                )?,
            }),
        })
    }
}

/// A persisted catalogue row of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CatalogueRecord {
    SkillGroup(SkillGroup),
    Skill(Skill),
    Project(ProjectRecord),
    Contact(Contact),
    InfoItem(InfoItem),
    SocialLink(SocialLink),
    Sections(Sections),
    Footer(Footer),
}

impl CatalogueRecord {
    pub fn kind(&self) -> CatalogueKind {
        match self {
            Self::SkillGroup(_) => CatalogueKind::SkillGroup,
            Self::Skill(_) => CatalogueKind::Skill,
            Self::Project(_) => CatalogueKind::Project,
            Self::Contact(_) => CatalogueKind::Contact,
            Self::InfoItem(_) => CatalogueKind::InfoItem,
            Self::SocialLink(_) => CatalogueKind::SocialLink,
            Self::Sections(_) => CatalogueKind::Sections,
            Self::Footer(_) => CatalogueKind::Footer,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::SkillGroup(row) => row.id,
            Self::Skill(row) => row.id,
            Self::Project(row) => row.id,
            Self::Contact(row) => row.id,
            Self::InfoItem(row) => row.id,
            Self::SocialLink(row) => row.id,
            Self::Sections(row) => row.id,
            Self::Footer(row) => row.id,
        }
    }
}

impl Listable for CatalogueRecord {
    fn active_flag(&self) -> Option<bool> {
        match self {
            Self::SkillGroup(row) => Some(row.is_active),
            Self::Skill(row) => Some(row.is_active),
            Self::Project(row) => Some(row.is_active),
            Self::Contact(row) => Some(row.is_active),
            Self::InfoItem(row) => Some(row.is_active),
            Self::SocialLink(row) => Some(row.is_active),
            Self::Sections(_) | Self::Footer(_) => None,
        }
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match (self, field) {
            (Self::SkillGroup(row), "title") => row.title.as_deref(),
            (Self::Skill(row), "title") => row.title.as_deref(),
            (Self::Project(row), "title") => row.title.as_deref(),
            (Self::Project(row), "description") => row.description.as_deref(),
            (Self::Contact(row), "title") => row.title.as_deref(),
            (Self::Contact(row), "description") => row.description.as_deref(),
            (Self::InfoItem(row), "key") => row.key.as_deref(),
            (Self::InfoItem(row), "value") => row.value.as_deref(),
            (Self::SocialLink(row), "title") => row.title.as_deref(),
            (Self::SocialLink(row), "link") => row.link.as_deref(),
            (Self::SocialLink(row), "icon") => row.icon.as_deref(),
            (Self::Footer(row), "copyright_text") => row.copyright_text.as_deref(),
            _ => None,
        }
    }
}
