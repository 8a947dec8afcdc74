//! Diesel row structs. Internal to the persistence adapters; the domain only
//! sees the types these convert into.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    abouts, contacts, footers, heroes, info_items, messages, metadata, project_skills, projects,
    sections, skill_groups, skills, social_links, users,
};
use crate::domain::content::{
    About, Contact, Footer, Hero, InfoItem, MetaData, Project, Sections, Skill, SkillGroup,
    SocialLink,
};
use crate::domain::{Email, Message, PhoneNumber, User, UserValidationError, Username};

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = metadata)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MetaDataRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<MetaDataRow> for MetaData {
    fn from(row: MetaDataRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            keywords: row.keywords,
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

impl From<&MetaData> for MetaDataRow {
    fn from(record: &MetaData) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            keywords: record.keywords.clone(),
            is_active: record.is_active,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = heroes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct HeroRow {
    pub id: Uuid,
    pub greeting: Option<String>,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<HeroRow> for Hero {
    fn from(row: HeroRow) -> Self {
        Self {
            id: row.id,
            greeting: row.greeting,
            full_name: row.full_name,
            title: row.title,
            bio: row.bio,
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Hero> for HeroRow {
    fn from(record: &Hero) -> Self {
        Self {
            id: record.id,
            greeting: record.greeting.clone(),
            full_name: record.full_name.clone(),
            title: record.title.clone(),
            bio: record.bio.clone(),
            is_active: record.is_active,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = abouts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AboutRow {
    pub id: Uuid,
    pub about: Option<String>,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<AboutRow> for About {
    fn from(row: AboutRow) -> Self {
        Self {
            id: row.id,
            about: row.about,
            avatar: row.avatar,
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

impl From<&About> for AboutRow {
    fn from(record: &About) -> Self {
        Self {
            id: record.id,
            about: record.about.clone(),
            avatar: record.avatar.clone(),
            is_active: record.is_active,
            updated_at: record.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = skill_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SkillGroupRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub is_active: bool,
}

impl From<SkillGroupRow> for SkillGroup {
    fn from(row: SkillGroupRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            is_active: row.is_active,
        }
    }
}

impl From<&SkillGroup> for SkillGroupRow {
    fn from(record: &SkillGroup) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub group_id: Option<Uuid>,
    pub is_active: bool,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            icon: row.icon,
            group_id: row.group_id,
            is_active: row.is_active,
        }
    }
}

impl From<&Skill> for SkillRow {
    fn from(record: &Skill) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            icon: record.icon.clone(),
            group_id: record.group_id,
            is_active: record.is_active,
        }
    }
}

/// Project columns only; linked skills are loaded separately.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub demo_url: Option<String>,
    pub source_url: Option<String>,
    pub ordering_index: Option<i32>,
    pub is_active: bool,
    pub created: DateTime<Utc>,
}

impl ProjectRow {
    pub(crate) fn into_project(self, skills: Vec<Skill>) -> Project {
        Project {
            id: self.id,
            title: self.title,
            description: self.description,
            image: self.image,
            demo_url: self.demo_url,
            source_url: self.source_url,
            ordering_index: self.ordering_index,
            is_active: self.is_active,
            created: self.created,
            skills,
        }
    }
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            demo_url: project.demo_url.clone(),
            source_url: project.source_url.clone(),
            ordering_index: project.ordering_index,
            is_active: project.is_active,
            created: project.created,
        }
    }
}

/// Editable project columns; `created` is fixed at insert.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub demo_url: Option<&'a str>,
    pub source_url: Option<&'a str>,
    pub ordering_index: Option<i32>,
    pub is_active: bool,
}

impl<'a> From<&'a Project> for ProjectChanges<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            title: project.title.as_deref(),
            description: project.description.as_deref(),
            image: project.image.as_deref(),
            demo_url: project.demo_url.as_deref(),
            source_url: project.source_url.as_deref(),
            ordering_index: project.ordering_index,
            is_active: project.is_active,
        }
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = project_skills)]
pub(crate) struct ProjectSkillRow {
    pub project_id: Uuid,
    pub skill_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            is_active: row.is_active,
        }
    }
}

impl From<&Contact> for ContactRow {
    fn from(record: &Contact) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = info_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct InfoItemRow {
    pub id: Uuid,
    pub key: Option<String>,
    pub value: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub contact_id: Option<Uuid>,
    pub is_active: bool,
}

impl From<InfoItemRow> for InfoItem {
    fn from(row: InfoItemRow) -> Self {
        Self {
            id: row.id,
            key: row.key,
            value: row.value,
            link: row.link,
            icon: row.icon,
            contact_id: row.contact_id,
            is_active: row.is_active,
        }
    }
}

impl From<&InfoItem> for InfoItemRow {
    fn from(record: &InfoItem) -> Self {
        Self {
            id: record.id,
            key: record.key.clone(),
            value: record.value.clone(),
            link: record.link.clone(),
            icon: record.icon.clone(),
            contact_id: record.contact_id,
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = social_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SocialLinkRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub contact_id: Option<Uuid>,
    pub is_active: bool,
}

impl From<SocialLinkRow> for SocialLink {
    fn from(row: SocialLinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            link: row.link,
            icon: row.icon,
            contact_id: row.contact_id,
            is_active: row.is_active,
        }
    }
}

impl From<&SocialLink> for SocialLinkRow {
    fn from(record: &SocialLink) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            link: record.link.clone(),
            icon: record.icon.clone(),
            contact_id: record.contact_id,
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = sections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SectionsRow {
    pub id: Uuid,
    pub about_me: bool,
    pub projects: bool,
    pub skills: bool,
    pub process: bool,
    pub contact: bool,
}

impl From<SectionsRow> for Sections {
    fn from(row: SectionsRow) -> Self {
        Self {
            id: row.id,
            about_me: row.about_me,
            projects: row.projects,
            skills: row.skills,
            process: row.process,
            contact: row.contact,
        }
    }
}

impl From<&Sections> for SectionsRow {
    fn from(record: &Sections) -> Self {
        Self {
            id: record.id,
            about_me: record.about_me,
            projects: record.projects,
            skills: record.skills,
            process: record.process,
            contact: record.contact,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = footers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FooterRow {
    pub id: Uuid,
    pub copyright_text: Option<String>,
}

impl From<FooterRow> for Footer {
    fn from(row: FooterRow) -> Self {
        Self {
            id: row.id,
            copyright_text: row.copyright_text,
        }
    }
}

impl From<&Footer> for FooterRow {
    fn from(record: &Footer) -> Self {
        Self {
            id: record.id,
            copyright_text: record.copyright_text.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            message: row.message,
            created: row.created,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessageRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub created: DateTime<Utc>,
}

impl<'a> From<&'a Message> for NewMessageRow<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            id: message.id,
            name: &message.name,
            email: &message.email,
            message: &message.message,
            created: message.created,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub profile_picture: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            email: Email::new(row.email)?,
            username: Username::new(row.username)?,
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            website: row.website,
            profile_picture: row.profile_picture,
            phone: row.phone.map(PhoneNumber::new).transpose()?,
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            last_login: row.last_login,
            date_joined: row.date_joined,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub website: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_ref(),
            username: user.username.as_ref(),
            first_name: user.first_name.as_deref(),
            last_name: user.last_name.as_deref(),
            bio: user.bio.as_deref(),
            website: user.website.as_deref(),
            profile_picture: user.profile_picture.as_deref(),
            phone: user.phone.as_ref().map(AsRef::as_ref),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            last_login: user.last_login,
            date_joined: user.date_joined,
        }
    }
}
