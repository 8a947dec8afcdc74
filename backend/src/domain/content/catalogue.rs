//! Multi-row page content: skills, projects, contact details and layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Default project source link.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroup {
    pub id: Uuid,
    pub title: Option<String>,
    pub is_active: bool,
}

/// A single skill. `group_id` is cleared when its group is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub group_id: Option<Uuid>,
    pub is_active: bool,
}

/// An active group with its active skills, possibly none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroupWithSkills {
    pub group: SkillGroup,
    pub skills: Vec<Skill>,
}

/// Portfolio project with the skills it showcases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub demo_url: Option<String>,
    pub source_url: Option<String>,
    pub ordering_index: Option<i32>,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Extra contact line such as phone or e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoItem {
    pub id: Uuid,
    pub key: Option<String>,
    pub value: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub contact_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: Uuid,
    pub title: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub contact_id: Option<Uuid>,
    pub is_active: bool,
}

/// The displayed contact block with its active items and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactWithItems {
    pub contact: Contact,
    pub info_items: Vec<InfoItem>,
    pub social_links: Vec<SocialLink>,
}

/// Section visibility toggles; every section is shown by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sections {
    pub id: Uuid,
    pub about_me: bool,
    pub projects: bool,
    pub skills: bool,
    pub process: bool,
    pub contact: bool,
}

impl Sections {
    /// All sections visible.
    pub fn visible(id: Uuid) -> Self {
        Self {
            id,
            about_me: true,
            projects: true,
            skills: true,
            process: true,
            contact: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub id: Uuid,
    pub copyright_text: Option<String>,
}
