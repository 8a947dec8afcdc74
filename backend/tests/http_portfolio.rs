//! End-to-end HTTP flows over the in-memory content store.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, test as actix_test, web};
use mockable::{Clock, DefaultClock};
use portfolio::Trace;
use portfolio::domain::{
    AdminSiteSettings, CatalogueContentService, ConfiguredLoginService, ContactIntakeService,
    PageContextService, SingletonContentService, TRACE_ID_HEADER, UserAccountService,
    hash_password,
};
use portfolio::inbound::http::health::{HealthState, live, ready};
use portfolio::inbound::http::state::{HttpState, HttpStatePorts};
use portfolio::inbound::http::{admin, public};
use portfolio::outbound::memory::InMemoryContentStore;
use serde_json::{Value, json};

fn http_state() -> HttpState {
    let store = Arc::new(InMemoryContentStore::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let intake = Arc::new(ContactIntakeService::new(store.clone(), clock.clone()));
    let password_hash = hash_password("segredo").expect("hash");
    let login = ConfiguredLoginService::new("ana", password_hash).expect("valid PHC");
    HttpState::new(
        HttpStatePorts {
            page: Arc::new(PageContextService::new(store.clone())),
            contact: intake.clone(),
            messages: intake,
            singletons: Arc::new(SingletonContentService::new(store.clone(), clock.clone())),
            catalogue: Arc::new(CatalogueContentService::new(store.clone(), clock.clone())),
            users: Arc::new(UserAccountService::new(store, clock)),
            login: Arc::new(login),
        },
        AdminSiteSettings::new(Some("Painel da Ana".into()), None, None),
        "https://ana.dev/",
    )
}

macro_rules! portfolio_app {
    () => {{
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        actix_test::init_service(
            App::new()
                .app_data(health)
                .app_data(web::Data::new(http_state()))
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                )
                .wrap(Trace)
                .service(web::scope("/api/v1").configure(admin::configure))
                .service(public::index)
                .service(public::submit_contact)
                .service(public::robots_txt)
                .service(public::sitemap_xml)
                .service(public::test_page)
                .service(ready)
                .service(live),
        )
        .await
    }};
}

#[actix_web::test]
async fn admin_edits_appear_on_the_public_page() {
    let app = portfolio_app!();

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "ana", "password": "segredo" }))
        .to_request();
    let response = actix_test::call_service(&app, login).await;
    assert!(response.status().is_success());
    let cookie = response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
        .expect("session cookie");

    for name in ["Ana Antiga", "Ana Souza"] {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/admin/heroes")
            .cookie(cookie.clone())
            .set_json(json!({ "fullName": name, "title": "Desenvolvedora" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let page: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/").to_request(),
    )
    .await;
    assert_eq!(page["page"]["hero"]["fullName"], "Ana Souza");

    let descriptors: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/descriptors")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(descriptors["site"]["siteHeader"], "Painel da Ana");
}

#[actix_web::test]
async fn catalogue_entries_appear_on_the_public_page() {
    let app = portfolio_app!();
    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "ana", "password": "segredo" }))
        .to_request();
    let response = actix_test::call_service(&app, login).await;
    let cookie = response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
        .expect("session cookie");

    let group: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/catalogue/skill-groups")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Backend" }))
            .to_request(),
    )
    .await;
    let skill: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/catalogue/skills")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Rust", "groupId": group["id"] }))
            .to_request(),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/admin/catalogue/projects")
        .cookie(cookie.clone())
        .set_json(json!({ "title": "Portfolio", "skillIds": [skill["id"]] }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 201);

    let page: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/").to_request(),
    )
    .await;
    assert_eq!(page["page"]["skillGroups"][0]["group"]["title"], "Backend");
    assert_eq!(page["page"]["skillGroups"][0]["skills"][0]["title"], "Rust");
    assert_eq!(page["page"]["projects"][0]["title"], "Portfolio");

    let uri = format!("/api/v1/admin/catalogue/skills/{}", skill["id"].as_str().expect("id"));
    let request = actix_test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 204);

    let page: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/").to_request(),
    )
    .await;
    assert_eq!(page["page"]["projects"][0]["title"], "Portfolio");
    assert_eq!(page["page"]["skillGroups"][0]["skills"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn visitor_messages_reach_the_admin_inbox() {
    let app = portfolio_app!();

    let submit = actix_test::TestRequest::post()
        .uri("/")
        .set_form([("name", "Bia"), ("email", "bia@example.com"), ("message", "Olá, Ana!")])
        .to_request();
    let response = actix_test::call_service(&app, submit).await;
    assert!(response.status().is_success());
    assert!(response.headers().contains_key(TRACE_ID_HEADER));

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "ana", "password": "segredo" }))
        .to_request();
    let response = actix_test::call_service(&app, login).await;
    let cookie = response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
        .expect("session cookie");

    let inbox: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/messages?q=bia")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let rows = inbox.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["message"], "Olá, Ana!");
    assert_eq!(rows[0]["preview"], "Olá, Ana!");
}

#[actix_web::test]
async fn sitemap_uses_the_configured_base_url() {
    let app = portfolio_app!();
    let body = actix_test::call_and_read_body(
        &app,
        actix_test::TestRequest::get().uri("/sitemap.xml").to_request(),
    )
    .await;
    let text = String::from_utf8(body.to_vec()).expect("utf-8");
    assert!(text.contains("<loc>https://ana.dev/</loc>"), "{text}");
}

#[actix_web::test]
async fn wrong_password_keeps_the_admin_api_closed() {
    let app = portfolio_app!();
    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "ana", "password": "errada" }))
        .to_request();
    let response = actix_test::call_service(&app, login).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/admin/users").to_request(),
    )
    .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn readiness_probe_reports_ready() {
    let app = portfolio_app!();
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert!(response.status().is_success());
}
