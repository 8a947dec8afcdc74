//! Portfolio content entities.

mod catalogue;
mod entries;
mod site;
mod text;

pub use catalogue::{
    Contact, ContactWithItems, DEFAULT_SOURCE_URL, Footer, InfoItem, Project, Sections, Skill,
    SkillGroup, SkillGroupWithSkills, SocialLink,
};
pub use entries::{
    CatalogueDraft, CatalogueKind, CatalogueRecord, ContactDraft, FooterDraft, InfoItemDraft,
    ProjectDraft, ProjectRecord, SectionsDraft, SkillDraft, SkillGroupDraft, SocialLinkDraft,
};
pub use site::{
    About, AboutDraft, DEFAULT_GREETING, Hero, HeroDraft, MetaData, MetaDataDraft, SingletonDraft,
    SingletonKind, SingletonRecord,
};
pub use text::{ContentValidationError, SHORT_TEXT_MAX, bounded_text, optional_text, optional_url};
