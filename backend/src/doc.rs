//! OpenAPI document for the portfolio backend.
//!
//! Registers the public site, the admin API and the health probes. Swagger
//! UI serves it in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::admin::{EntityDescriptor, StatusColour};
use crate::domain::content::{
    About, AboutDraft, CatalogueRecord, Contact, ContactDraft, ContactWithItems, Footer,
    FooterDraft, Hero, HeroDraft, InfoItem, InfoItemDraft, MetaData, MetaDataDraft, Project,
    ProjectDraft, ProjectRecord, Sections, SectionsDraft, SingletonRecord, Skill, SkillDraft,
    SkillGroup, SkillGroupDraft, SkillGroupWithSkills, SocialLink, SocialLinkDraft,
};
use crate::domain::{
    AdminSiteSettings, ContactSubmissionRequest, EntityKind, Error, ErrorCode, Message,
    NewUserRequest, PageContext, User,
};
use crate::inbound::http::admin::{DescriptorsResponse, LoginRequest};
use crate::inbound::http::public::{Flash, FlashLevel, PageView};

/// Adds the admin session cookie scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Administrator session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Portfolio backend API",
        description = "Public portfolio page, contact intake and content administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::public::index,
        crate::inbound::http::public::submit_contact,
        crate::inbound::http::public::robots_txt,
        crate::inbound::http::public::sitemap_xml,
        crate::inbound::http::public::test_page,
        crate::inbound::http::admin::login,
        crate::inbound::http::admin::list_descriptors,
        crate::inbound::http::admin::list_messages,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::create_user,
        crate::inbound::http::admin::list_catalogue,
        crate::inbound::http::admin::create_catalogue_entry,
        crate::inbound::http::admin::update_catalogue_entry,
        crate::inbound::http::admin::delete_catalogue_entry,
        crate::inbound::http::admin::list_singletons,
        crate::inbound::http::admin::create_singleton,
        crate::inbound::http::admin::update_singleton,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PageView,
        Flash,
        FlashLevel,
        PageContext,
        MetaData,
        Hero,
        About,
        SkillGroupWithSkills,
        Project,
        ContactWithItems,
        Sections,
        Footer,
        ContactSubmissionRequest,
        Message,
        LoginRequest,
        DescriptorsResponse,
        AdminSiteSettings,
        EntityDescriptor,
        EntityKind,
        StatusColour,
        SingletonRecord,
        MetaDataDraft,
        HeroDraft,
        AboutDraft,
        CatalogueRecord,
        SkillGroup,
        Skill,
        ProjectRecord,
        Contact,
        InfoItem,
        SocialLink,
        SkillGroupDraft,
        SkillDraft,
        ProjectDraft,
        ContactDraft,
        InfoItemDraft,
        SocialLinkDraft,
        SectionsDraft,
        FooterDraft,
        User,
        NewUserRequest,
    )),
    tags(
        (name = "public", description = "Portfolio page and crawler files"),
        (name = "admin", description = "Content administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
