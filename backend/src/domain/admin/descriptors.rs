//! Static capability declarations for every administrable entity.
//!
//! Descriptors start from [`EntityDescriptor::base`] and gain capabilities
//! through `const` composition, so the whole registry is built at compile
//! time.

use serde::Serialize;
use utoipa::ToSchema;

/// Every entity exposed to administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    MetaData,
    Hero,
    About,
    SkillGroup,
    Skill,
    Project,
    Contact,
    InfoItem,
    SocialLink,
    Sections,
    Footer,
    Message,
    User,
}

impl EntityKind {
    pub const ALL: [Self; 13] = [
        Self::MetaData,
        Self::Hero,
        Self::About,
        Self::SkillGroup,
        Self::Skill,
        Self::Project,
        Self::Contact,
        Self::InfoItem,
        Self::SocialLink,
        Self::Sections,
        Self::Footer,
        Self::Message,
        Self::User,
    ];
}

/// What the admin surface may do with an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    #[schema(value_type = String)]
    pub display_name: &'static str,
    #[schema(value_type = String)]
    pub display_name_plural: &'static str,
    pub has_active_flag: bool,
    /// Whether list rows carry a status icon.
    pub status_column: bool,
    #[schema(value_type = Vec<String>)]
    pub timestamp_fields: &'static [&'static str],
    /// Fields forms must not edit.
    #[schema(value_type = Vec<String>)]
    pub readonly_fields: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub search_fields: &'static [&'static str],
    /// Field inspected by the `has_content` filter.
    #[schema(value_type = Option<String>)]
    pub principal_field: Option<&'static str>,
    pub singleton: bool,
    pub bulk_delete: bool,
}

impl EntityDescriptor {
    const fn base(
        kind: EntityKind,
        display_name: &'static str,
        display_name_plural: &'static str,
        has_active_flag: bool,
    ) -> Self {
        Self {
            kind,
            display_name,
            display_name_plural,
            has_active_flag,
            status_column: false,
            timestamp_fields: &[],
            readonly_fields: &[],
            search_fields: &[],
            principal_field: None,
            singleton: false,
            bulk_delete: true,
        }
    }

    const fn searching(mut self, fields: &'static [&'static str]) -> Self {
        self.search_fields = fields;
        self
    }

    const fn principal(mut self, field: &'static str) -> Self {
        self.principal_field = Some(field);
        self
    }

    const fn timestamps(mut self, fields: &'static [&'static str]) -> Self {
        self.timestamp_fields = fields;
        self
    }

    /// Single-active-row entity: bulk deletion is withdrawn.
    const fn singleton(mut self) -> Self {
        self.singleton = true;
        self.bulk_delete = false;
        self
    }
}

/// Add the status column when the entity has an active flag.
pub const fn with_status_icon(mut descriptor: EntityDescriptor) -> EntityDescriptor {
    descriptor.status_column = descriptor.has_active_flag;
    descriptor
}

/// Mark every timestamp field read-only.
pub const fn with_timestamp_readonly(mut descriptor: EntityDescriptor) -> EntityDescriptor {
    descriptor.readonly_fields = descriptor.timestamp_fields;
    descriptor
}

const fn admin(descriptor: EntityDescriptor) -> EntityDescriptor {
    with_timestamp_readonly(with_status_icon(descriptor))
}

static METADATA: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::MetaData, "Metadado", "Metadados", true)
        .searching(&["title", "description", "keywords"])
        .principal("description")
        .timestamps(&["updated_at"])
        .singleton(),
);
static HERO: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::Hero, "Hero", "Hero", true)
        .searching(&["full_name", "title", "greeting", "bio"])
        .principal("bio")
        .timestamps(&["updated_at"])
        .singleton(),
);
static ABOUT: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::About, "Sobre", "Sobre", true)
        .searching(&["about"])
        .principal("about")
        .timestamps(&["updated_at"])
        .singleton(),
);
static SKILL_GROUP: EntityDescriptor = admin(
    EntityDescriptor::base(
        EntityKind::SkillGroup,
        "Grupo de habilidades",
        "Grupos de habilidades",
        true,
    )
        .searching(&["title"])
        .principal("title"),
);
static SKILL: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::Skill, "Habilidade", "Habilidades", true)
        .searching(&["title"])
        .principal("title"),
);
static PROJECT: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::Project, "Projeto", "Projetos", true)
        .searching(&["title", "description"])
        .principal("description")
        .timestamps(&["created"]),
);
static CONTACT: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::Contact, "Contato", "Contatos", true)
        .searching(&["title", "description"])
        .principal("description"),
);
static INFO_ITEM: EntityDescriptor = admin(
    EntityDescriptor::base(
        EntityKind::InfoItem,
        "Item de informação",
        "Itens de informação",
        true,
    )
        .searching(&["key", "value"])
        .principal("value"),
);
static SOCIAL_LINK: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::SocialLink, "Link social", "Links sociais", true)
        .searching(&["title", "link", "icon"])
        .principal("link"),
);
static SECTIONS: EntityDescriptor = admin(EntityDescriptor::base(
    EntityKind::Sections,
    "Seção",
    "Seções",
    false,
));
static FOOTER: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::Footer, "Rodapé", "Rodapés", false)
        .searching(&["copyright_text"])
        .principal("copyright_text"),
);
static MESSAGE: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::Message, "Mensagem", "Mensagens", false)
        .searching(&["name", "email", "message"])
        .principal("message")
        .timestamps(&["created"]),
);
static USER: EntityDescriptor = admin(
    EntityDescriptor::base(EntityKind::User, "Usuário", "Usuários", true)
        .searching(&["email", "username"])
        .principal("bio")
        .timestamps(&["last_login", "date_joined"]),
);

/// Look up the descriptor for `kind`.
pub fn descriptor(kind: EntityKind) -> &'static EntityDescriptor {
    match kind {
        EntityKind::MetaData => &METADATA,
        EntityKind::Hero => &HERO,
        EntityKind::About => &ABOUT,
        EntityKind::SkillGroup => &SKILL_GROUP,
        EntityKind::Skill => &SKILL,
        EntityKind::Project => &PROJECT,
        EntityKind::Contact => &CONTACT,
        EntityKind::InfoItem => &INFO_ITEM,
        EntityKind::SocialLink => &SOCIAL_LINK,
        EntityKind::Sections => &SECTIONS,
        EntityKind::Footer => &FOOTER,
        EntityKind::Message => &MESSAGE,
        EntityKind::User => &USER,
    }
}
