//! Administrative JSON API.
//!
//! ```text
//! POST /api/v1/login                    {"username":"admin","password":"..."}
//! GET  /api/v1/admin/descriptors
//! GET  /api/v1/admin/messages?q=ana
//! GET  /api/v1/admin/users
//! POST /api/v1/admin/users              {"email":"...","username":"..."}
//! GET  /api/v1/admin/{metadata|heroes|about}?is_active=1
//! POST /api/v1/admin/{metadata|heroes|about}
//! PUT  /api/v1/admin/{metadata|heroes|about}/{id}
//! GET    /api/v1/admin/catalogue/{segment}?q=rust
//! POST   /api/v1/admin/catalogue/{segment}
//! PUT    /api/v1/admin/catalogue/{segment}/{id}
//! DELETE /api/v1/admin/catalogue/{segment}/{id}
//! ```
//!
//! Catalogue segments: `skill-groups`, `skills`, `projects`, `contacts`,
//! `info-items`, `social-links`, `sections` and `footers`.
//!
//! Everything except login requires an administrator session.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::admin::{EntityDescriptor, ListFilterError, decorate, descriptor, preview};
use crate::domain::content::{
    AboutDraft, CatalogueDraft, CatalogueKind, CatalogueRecord, HeroDraft, MetaDataDraft,
    SingletonDraft, SingletonKind, SingletonRecord,
};
use crate::domain::singleton_content::entity_kind;
use crate::domain::{
    AdminSiteSettings, CatalogueWrite, EntityKind, Error, ListFilter, ListQuery, LoginCredentials,
    LoginValidationError, Message, NewUserRequest, SingletonWrite, User, WriteTarget,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_filter_error(err: ListFilterError) -> Error {
    let parameter = match &err {
        ListFilterError::InvalidValue { parameter, .. }
        | ListFilterError::Unsupported { parameter, .. } => *parameter,
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": parameter, "code": "invalid_filter" }))
}

fn parse_filter(query: ListQuery) -> Result<ListFilter, Error> {
    ListFilter::try_from(query).map_err(map_filter_error)
}

/// URL segment naming a singleton collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingletonSegment {
    Metadata,
    Heroes,
    About,
}

impl From<SingletonSegment> for SingletonKind {
    fn from(segment: SingletonSegment) -> Self {
        match segment {
            SingletonSegment::Metadata => Self::MetaData,
            SingletonSegment::Heroes => Self::Hero,
            SingletonSegment::About => Self::About,
        }
    }
}

fn parse_draft(kind: SingletonKind, body: Value) -> Result<SingletonDraft, Error> {
    let invalid = |err: serde_json::Error| {
        Error::invalid_request(format!("invalid {} payload: {err}", kind.as_str()))
            .with_details(json!({ "code": "invalid_payload" }))
    };
    Ok(match kind {
        SingletonKind::MetaData => SingletonDraft::MetaData(
            serde_json::from_value::<MetaDataDraft>(body).map_err(invalid)?,
        ),
        SingletonKind::Hero => {
            SingletonDraft::Hero(serde_json::from_value::<HeroDraft>(body).map_err(invalid)?)
        }
        SingletonKind::About => {
            SingletonDraft::About(serde_json::from_value::<AboutDraft>(body).map_err(invalid)?)
        }
    })
}

/// URL segment naming a catalogue collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogueSegment {
    SkillGroups,
    Skills,
    Projects,
    Contacts,
    InfoItems,
    SocialLinks,
    Sections,
    Footers,
}

impl From<CatalogueSegment> for CatalogueKind {
    fn from(segment: CatalogueSegment) -> Self {
        match segment {
            CatalogueSegment::SkillGroups => Self::SkillGroup,
            CatalogueSegment::Skills => Self::Skill,
            CatalogueSegment::Projects => Self::Project,
            CatalogueSegment::Contacts => Self::Contact,
            CatalogueSegment::InfoItems => Self::InfoItem,
            CatalogueSegment::SocialLinks => Self::SocialLink,
            CatalogueSegment::Sections => Self::Sections,
            CatalogueSegment::Footers => Self::Footer,
        }
    }
}

fn parse_catalogue_draft(kind: CatalogueKind, body: Value) -> Result<CatalogueDraft, Error> {
    fn decode<T: DeserializeOwned>(kind: CatalogueKind, body: Value) -> Result<T, Error> {
        serde_json::from_value(body).map_err(|err| {
            Error::invalid_request(format!("invalid {} payload: {err}", kind.as_str()))
                .with_details(json!({ "code": "invalid_payload" }))
        })
    }
    Ok(match kind {
        CatalogueKind::SkillGroup => CatalogueDraft::SkillGroup(decode(kind, body)?),
        CatalogueKind::Skill => CatalogueDraft::Skill(decode(kind, body)?),
        CatalogueKind::Project => CatalogueDraft::Project(decode(kind, body)?),
        CatalogueKind::Contact => CatalogueDraft::Contact(decode(kind, body)?),
        CatalogueKind::InfoItem => CatalogueDraft::InfoItem(decode(kind, body)?),
        CatalogueKind::SocialLink => CatalogueDraft::SocialLink(decode(kind, body)?),
        CatalogueKind::Sections => CatalogueDraft::Sections(decode(kind, body)?),
        CatalogueKind::Footer => CatalogueDraft::Footer(decode(kind, body)?),
    })
}

/// Authenticate an administrator and open a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["admin"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let admin = state.login.authenticate(&credentials).await?;
    session.persist_admin(&admin)?;
    info!(admin = admin.username(), "administrator logged in");
    Ok(HttpResponse::Ok().finish())
}

/// Admin branding plus the capability declaration of every entity.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorsResponse {
    pub site: AdminSiteSettings,
    pub entities: Vec<EntityDescriptor>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/descriptors",
    responses(
        (status = 200, description = "Entity descriptors", body = DescriptorsResponse),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listDescriptors"
)]
#[get("/admin/descriptors")]
pub async fn list_descriptors(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let body = DescriptorsResponse {
        site: state.admin_site.clone(),
        entities: EntityKind::ALL.iter().map(|kind| *descriptor(*kind)).collect(),
    };
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

const MESSAGE_PREVIEW_CHARS: usize = 50;

/// A stored message with a shortened body for list views.
#[derive(Debug, Serialize)]
struct MessageRow {
    #[serde(flatten)]
    message: Message,
    preview: String,
}

impl From<Message> for MessageRow {
    fn from(message: Message) -> Self {
        Self {
            preview: preview(&message.message, MESSAGE_PREVIEW_CHARS),
            message,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/messages",
    params(ListQuery),
    responses(
        (
            status = 200,
            description = "Messages, newest first, each with a `preview` of its body",
            body = [Message]
        ),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listMessages"
)]
#[get("/admin/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let filter = parse_filter(query.into_inner())?;
    let rows: Vec<MessageRow> = state
        .messages
        .list_messages(&filter)
        .await?
        .into_iter()
        .map(MessageRow::from)
        .collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(ListQuery),
    responses(
        (status = 200, description = "Users ordered by email, with status icons", body = [User]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let filter = parse_filter(query.into_inner())?;
    let rows = state.users.list(&filter).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(decorate(EntityKind::User, rows)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/users",
    request_body = NewUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid field", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Email or username taken", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createUser"
)]
#[post("/admin/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewUserRequest>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let user = state.users.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(user))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/{kind}",
    params(
        ("kind" = String, Path, description = "`metadata`, `heroes` or `about`"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Rows with status icons", body = [SingletonRecord]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown collection")
    ),
    tags = ["admin"],
    operation_id = "listSingletons"
)]
#[get("/admin/{kind}")]
pub async fn list_singletons(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<SingletonSegment>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let kind = SingletonKind::from(path.into_inner());
    let filter = parse_filter(query.into_inner())?;
    let rows = state.singletons.list(kind, &filter).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(decorate(entity_kind(kind), rows)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/{kind}",
    params(("kind" = String, Path, description = "`metadata`, `heroes` or `about`")),
    request_body(content = Object, description = "MetaDataDraft, HeroDraft or AboutDraft"),
    responses(
        (
            status = 201,
            description = "Row created; siblings deactivated when active",
            body = SingletonRecord
        ),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createSingleton"
)]
#[post("/admin/{kind}")]
pub async fn create_singleton(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<SingletonSegment>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let kind = SingletonKind::from(path.into_inner());
    let draft = parse_draft(kind, body.into_inner())?;
    let record = state
        .singletons
        .save(SingletonWrite {
            target: WriteTarget::Create,
            draft,
        })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(record))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`metadata`, `heroes` or `about`"),
        ("id" = Uuid, Path, description = "Row id")
    ),
    request_body(content = Object, description = "MetaDataDraft, HeroDraft or AboutDraft"),
    responses(
        (status = 200, description = "Row replaced", body = SingletonRecord),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such row", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateSingleton"
)]
#[put("/admin/{kind}/{id}")]
pub async fn update_singleton(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(SingletonSegment, Uuid)>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let (segment, id) = path.into_inner();
    let kind = SingletonKind::from(segment);
    let draft = parse_draft(kind, body.into_inner())?;
    let record = state
        .singletons
        .save(SingletonWrite {
            target: WriteTarget::Update(id),
            draft,
        })
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(record))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/catalogue/{segment}",
    params(
        ("segment" = String, Path, description = "Catalogue collection, e.g. `skills`"),
        ListQuery
    ),
    responses(
        (
            status = 200,
            description = "Rows with status icons where the entity has an active flag",
            body = [CatalogueRecord]
        ),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown collection")
    ),
    tags = ["admin"],
    operation_id = "listCatalogue"
)]
#[get("/admin/catalogue/{segment}")]
pub async fn list_catalogue(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CatalogueSegment>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let kind = CatalogueKind::from(path.into_inner());
    let filter = parse_filter(query.into_inner())?;
    let rows = state.catalogue.list(kind, &filter).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(decorate(kind.entity_kind(), rows)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/catalogue/{segment}",
    params(("segment" = String, Path, description = "Catalogue collection, e.g. `skills`")),
    request_body(content = Object, description = "The draft matching the segment, e.g. SkillDraft"),
    responses(
        (status = 201, description = "Row created", body = CatalogueRecord),
        (status = 400, description = "Invalid payload or unknown reference", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createCatalogueEntry"
)]
#[post("/admin/catalogue/{segment}")]
pub async fn create_catalogue_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CatalogueSegment>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let kind = CatalogueKind::from(path.into_inner());
    let draft = parse_catalogue_draft(kind, body.into_inner())?;
    let record = state
        .catalogue
        .save(CatalogueWrite {
            target: WriteTarget::Create,
            draft,
        })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_cache_header())
        .json(record))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/catalogue/{segment}/{id}",
    params(
        ("segment" = String, Path, description = "Catalogue collection, e.g. `skills`"),
        ("id" = Uuid, Path, description = "Row id")
    ),
    request_body(content = Object, description = "The draft matching the segment, e.g. SkillDraft"),
    responses(
        (status = 200, description = "Row replaced", body = CatalogueRecord),
        (status = 400, description = "Invalid payload or unknown reference", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such row", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateCatalogueEntry"
)]
#[put("/admin/catalogue/{segment}/{id}")]
pub async fn update_catalogue_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(CatalogueSegment, Uuid)>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let (segment, id) = path.into_inner();
    let kind = CatalogueKind::from(segment);
    let draft = parse_catalogue_draft(kind, body.into_inner())?;
    let record = state
        .catalogue
        .save(CatalogueWrite {
            target: WriteTarget::Update(id),
            draft,
        })
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(record))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/catalogue/{segment}/{id}",
    params(
        ("segment" = String, Path, description = "Catalogue collection, e.g. `skills`"),
        ("id" = Uuid, Path, description = "Row id")
    ),
    responses(
        (status = 204, description = "Row deleted; dependent rows keep existing"),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such row", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteCatalogueEntry"
)]
#[delete("/admin/catalogue/{segment}/{id}")]
pub async fn delete_catalogue_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(CatalogueSegment, Uuid)>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let (segment, id) = path.into_inner();
    state.catalogue.delete(CatalogueKind::from(segment), id).await?;
    Ok(HttpResponse::NoContent()
        .insert_header(private_no_cache_header())
        .finish())
}

/// Register the admin routes; specific paths precede `{kind}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(list_descriptors)
        .service(list_messages)
        .service(list_users)
        .service(create_user)
        .service(list_catalogue)
        .service(create_catalogue_entry)
        .service(update_catalogue_entry)
        .service(delete_catalogue_entry)
        .service(list_singletons)
        .service(create_singleton)
        .service(update_singleton);
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
