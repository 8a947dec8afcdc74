//! Public site: the portfolio page, its contact form and crawler files.
//!
//! ```text
//! GET  /             -> PageView
//! POST /             name=Ana&email=ana@example.com&message=Olá
//! GET  /robots.txt
//! GET  /sitemap.xml
//! GET  /test/        (administrators only)
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{ContactSubmissionRequest, Message, PageContext};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{private_no_cache_header, public_one_day_header};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub const CONTACT_SUCCESS_MESSAGE: &str = "Mensagem enviada com sucesso!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
}

/// One-shot notice shown above the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Render context for the public page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page: PageContext,
    pub flash: Option<Flash>,
    /// The message stored by this request, after a successful submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<Message>,
}

/// Render the portfolio page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Page content", body = PageView)),
    tags = ["public"],
    operation_id = "index",
    security([])
)]
#[get("/")]
pub async fn index(state: web::Data<HttpState>) -> web::Json<PageView> {
    web::Json(PageView {
        page: state.page.page_context().await,
        flash: None,
        submitted: None,
    })
}

/// Accept the contact form and re-render the page.
#[utoipa::path(
    post,
    path = "/",
    request_body(
        content = ContactSubmissionRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Message stored", body = PageView),
        (status = 400, description = "A field is missing or blank", body = crate::domain::Error),
        (status = 503, description = "Content store unavailable", body = crate::domain::Error)
    ),
    tags = ["public"],
    operation_id = "submitContact",
    security([])
)]
#[post("/")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    form: web::Form<ContactSubmissionRequest>,
) -> ApiResult<web::Json<PageView>> {
    let message = state.contact.submit(form.into_inner()).await?;
    info!(message_id = %message.id, "contact message received");
    Ok(web::Json(PageView {
        page: state.page.page_context().await,
        flash: Some(Flash {
            level: FlashLevel::Success,
            message: CONTACT_SUCCESS_MESSAGE.to_owned(),
        }),
        submitted: Some(message),
    }))
}

fn robots_body(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}

fn sitemap_body(base_url: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
            "  <url>\n",
            "    <loc>{}/</loc>\n",
            "    <changefreq>monthly</changefreq>\n",
            "    <priority>1.0</priority>\n",
            "  </url>\n",
            "</urlset>\n"
        ),
        base_url
    )
}

#[utoipa::path(
    get,
    path = "/robots.txt",
    responses((
        status = 200,
        description = "Crawler rules",
        body = String,
        content_type = "text/plain"
    )),
    tags = ["public"],
    security([])
)]
#[get("/robots.txt")]
pub async fn robots_txt(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(public_one_day_header())
        .body(robots_body(&state.public_base_url))
}

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses((
        status = 200,
        description = "Sitemap",
        body = String,
        content_type = "application/xml"
    )),
    tags = ["public"],
    security([])
)]
#[get("/sitemap.xml")]
pub async fn sitemap_xml(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::xml())
        .insert_header(public_one_day_header())
        .body(sitemap_body(&state.public_base_url))
}

/// Smoke page for logged-in administrators.
#[utoipa::path(
    get,
    path = "/test/",
    responses(
        (status = 200, description = "Authenticated"),
        (status = 401, description = "Login required", body = crate::domain::Error)
    ),
    tags = ["public"]
)]
#[get("/test/")]
pub async fn test_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let admin = session.require_admin()?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(serde_json::json!({ "status": "ok", "admin": admin.username() })))
}

#[cfg(test)]
#[path = "public_tests.rs"]
mod tests;
