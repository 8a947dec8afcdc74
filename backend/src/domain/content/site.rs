//! Singleton page content: SEO metadata, hero banner and about section.
//!
//! At most one row of each kind is active at any committed state; see
//! [`crate::domain::SingletonContentService`] for the write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::admin::Listable;

use super::text::{ContentValidationError, SHORT_TEXT_MAX, bounded_text, optional_text};

/// Greeting used when a hero draft omits the field.
pub const DEFAULT_GREETING: &str = "Olá, meu nome é";

fn default_active() -> bool {
    true
}

fn default_greeting() -> Option<String> {
    Some(DEFAULT_GREETING.to_owned())
}

/// Entity types governed by the single-active-row rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SingletonKind {
    MetaData,
    Hero,
    About,
}

impl SingletonKind {
    pub const ALL: [Self; 3] = [Self::MetaData, Self::Hero, Self::About];

    /// Stable key used for logging and advisory locks.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MetaData => "metadata",
            Self::Hero => "hero",
            Self::About => "about",
        }
    }
}

/// SEO metadata rendered into the page head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Incoming metadata fields prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl MetaData {
    pub fn from_draft(
        id: Uuid,
        draft: MetaDataDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ContentValidationError> {
        Ok(Self {
            id,
            title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
            description: optional_text(draft.description),
            keywords: optional_text(draft.keywords),
            is_active: draft.is_active,
            updated_at,
        })
    }
}

/// Landing banner with greeting, name and professional title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: Uuid,
    pub greeting: Option<String>,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Incoming hero fields. A missing `greeting` takes [`DEFAULT_GREETING`];
/// an explicit `null` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeroDraft {
    #[serde(default = "default_greeting")]
    pub greeting: Option<String>,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for HeroDraft {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            full_name: None,
            title: None,
            bio: None,
            is_active: true,
        }
    }
}

impl Hero {
    pub fn from_draft(
        id: Uuid,
        draft: HeroDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ContentValidationError> {
        Ok(Self {
            id,
            greeting: bounded_text("greeting", draft.greeting, SHORT_TEXT_MAX)?,
            full_name: bounded_text("fullName", draft.full_name, SHORT_TEXT_MAX)?,
            title: bounded_text("title", draft.title, SHORT_TEXT_MAX)?,
            bio: optional_text(draft.bio),
            is_active: draft.is_active,
            updated_at,
        })
    }
}

/// "About me" text with an optional avatar image path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub id: Uuid,
    pub about: Option<String>,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutDraft {
    pub about: Option<String>,
    pub avatar: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl About {
    pub fn from_draft(
        id: Uuid,
        draft: AboutDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ContentValidationError> {
        Ok(Self {
            id,
            about: optional_text(draft.about),
            avatar: bounded_text("avatar", draft.avatar, SHORT_TEXT_MAX)?,
            is_active: draft.is_active,
            updated_at,
        })
    }
}

/// A draft for any singleton kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingletonDraft {
    MetaData(MetaDataDraft),
    Hero(HeroDraft),
    About(AboutDraft),
}

impl SingletonDraft {
    pub fn kind(&self) -> SingletonKind {
        match self {
            Self::MetaData(_) => SingletonKind::MetaData,
            Self::Hero(_) => SingletonKind::Hero,
            Self::About(_) => SingletonKind::About,
        }
    }

    /// Validate the draft into a record with the given identity.
    pub fn into_record(
        self,
        id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<SingletonRecord, ContentValidationError> {
        Ok(match self {
            Self::MetaData(draft) => {
                SingletonRecord::MetaData(MetaData::from_draft(id, draft, updated_at)?)
            }
            Self::Hero(draft) => SingletonRecord::Hero(Hero::from_draft(id, draft, updated_at)?),
            Self::About(draft) => SingletonRecord::About(About::from_draft(id, draft, updated_at)?),
        })
    }
}

/// A persisted singleton row of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SingletonRecord {
    MetaData(MetaData),
    Hero(Hero),
    About(About),
}

impl SingletonRecord {
    pub fn kind(&self) -> SingletonKind {
        match self {
            Self::MetaData(_) => SingletonKind::MetaData,
            Self::Hero(_) => SingletonKind::Hero,
            Self::About(_) => SingletonKind::About,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::MetaData(row) => row.id,
            Self::Hero(row) => row.id,
            Self::About(row) => row.id,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::MetaData(row) => row.is_active,
            Self::Hero(row) => row.is_active,
            Self::About(row) => row.is_active,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::MetaData(row) => row.updated_at,
            Self::Hero(row) => row.updated_at,
            Self::About(row) => row.updated_at,
        }
    }

    /// Copy of the record with its active flag cleared.
    #[must_use]
    pub fn deactivated(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            Self::MetaData(row) => row.is_active = false,
            Self::Hero(row) => row.is_active = false,
            Self::About(row) => row.is_active = false,
        }
        copy
    }
}

impl Listable for SingletonRecord {
    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active())
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match (self, field) {
            (Self::MetaData(row), "title") => row.title.as_deref(),
            (Self::MetaData(row), "description") => row.description.as_deref(),
            (Self::MetaData(row), "keywords") => row.keywords.as_deref(),
            (Self::Hero(row), "greeting") => row.greeting.as_deref(),
            (Self::Hero(row), "full_name") => row.full_name.as_deref(),
            (Self::Hero(row), "title") => row.title.as_deref(),
            (Self::Hero(row), "bio") => row.bio.as_deref(),
            (Self::About(row), "about") => row.about.as_deref(),
            (Self::About(row), "avatar") => row.avatar.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hero_draft_defaults_greeting_when_missing() {
        let draft: HeroDraft = serde_json::from_str(r#"{"fullName": "Ana"}"#).expect("draft");
        assert_eq!(draft.greeting.as_deref(), Some(DEFAULT_GREETING));
        assert!(draft.is_active);
    }

    #[rstest]
    fn hero_draft_honours_explicit_null_greeting() {
        let draft: HeroDraft = serde_json::from_str(r#"{"greeting": null}"#).expect("draft");
        assert!(draft.greeting.is_none());
    }

    #[rstest]
    fn metadata_rejects_overlong_titles() {
        let draft = MetaDataDraft {
            title: Some("x".repeat(SHORT_TEXT_MAX + 1)),
            ..MetaDataDraft::default()
        };
        let err = MetaData::from_draft(Uuid::nil(), draft, Utc::now()).expect_err("too long");
        assert_eq!(err.field(), "title");
    }

    #[rstest]
    fn deactivated_clears_only_the_flag() {
        let record = SingletonDraft::About(AboutDraft {
            about: Some(" Sobre ".into()),
            avatar: None,
            is_active: true,
        })
        .into_record(Uuid::nil(), Utc::now())
        .expect("valid");
        let off = record.deactivated();
        assert!(!off.is_active());
        assert_eq!(off.id(), record.id());
        assert_eq!(off.kind(), SingletonKind::About);
    }
}
