//! Tests for the public site handlers.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::content::{HeroDraft, SingletonDraft};
use crate::domain::ports::{MessageRepository, MockContactIntakeCommand};
use crate::domain::{Error, SingletonWrite, WriteTarget};
use crate::inbound::http::admin;
use crate::inbound::http::cache_control::PUBLIC_ONE_DAY;
use crate::inbound::http::test_utils::{memory_state, session_cookie, test_session_middleware};
use crate::outbound::memory::InMemoryContentStore;

macro_rules! public_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new($state))
                .service(web::scope("/api/v1").service(admin::login))
                .service(index)
                .service(submit_contact)
                .service(robots_txt)
                .service(sitemap_xml)
                .service(test_page),
        )
        .await
    };
}

fn contact_form(name: &str, email: &str, message: &str) -> [(&'static str, String); 3] {
    [
        ("name", name.to_owned()),
        ("email", email.to_owned()),
        ("message", message.to_owned()),
    ]
}

#[actix_web::test]
async fn index_renders_an_empty_page_for_an_empty_store() {
    let app = public_app!(memory_state(Arc::new(InMemoryContentStore::default())));

    let request = actix_test::TestRequest::get().uri("/").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["page"]["hero"], Value::Null);
    assert_eq!(body["page"]["projects"], json!([]));
    assert_eq!(body["flash"], Value::Null);
    assert!(body.get("submitted").is_none());
}

#[actix_web::test]
async fn index_includes_the_active_hero() {
    let state = memory_state(Arc::new(InMemoryContentStore::default()));
    state
        .singletons
        .save(SingletonWrite {
            target: WriteTarget::Create,
            draft: SingletonDraft::Hero(HeroDraft {
                full_name: Some("Ana Souza".into()),
                ..HeroDraft::default()
            }),
        })
        .await
        .expect("hero saved");
    let app = public_app!(state);

    let request = actix_test::TestRequest::get().uri("/").to_request();
    let response = actix_test::call_service(&app, request).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["page"]["hero"]["fullName"], "Ana Souza");
    assert_eq!(body["page"]["hero"]["greeting"], "Olá, meu nome é");
}

#[actix_web::test]
async fn contact_submission_stores_the_message_and_flashes_success() {
    let store = Arc::new(InMemoryContentStore::default());
    let app = public_app!(memory_state(store.clone()));

    let request = actix_test::TestRequest::post()
        .uri("/")
        .set_form(contact_form("Ana", "ana@example.com", "Olá"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["flash"]["level"], "success");
    assert_eq!(body["flash"]["message"], CONTACT_SUCCESS_MESSAGE);
    assert_eq!(body["submitted"]["email"], "ana@example.com");

    let stored = MessageRepository::list(&*store).await.expect("messages listed");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ana");
}

#[actix_web::test]
async fn blank_contact_field_is_rejected_and_nothing_is_stored() {
    let store = Arc::new(InMemoryContentStore::default());
    let app = public_app!(memory_state(store.clone()));

    let request = actix_test::TestRequest::post()
        .uri("/")
        .set_form(contact_form("  ", "ana@example.com", "Olá"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "all_fields_required");
    assert_eq!(body["details"]["fields"], json!(["name"]));

    let stored = MessageRepository::list(&*store).await.expect("messages listed");
    assert!(stored.is_empty());
}

#[actix_web::test]
async fn store_outage_on_submission_is_service_unavailable() {
    let mut contact = MockContactIntakeCommand::new();
    contact
        .expect_submit()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("content store unavailable")));
    let mut state = memory_state(Arc::new(InMemoryContentStore::default()));
    state.contact = Arc::new(contact);
    let app = public_app!(state);

    let request = actix_test::TestRequest::post()
        .uri("/")
        .set_form(contact_form("Ana", "ana@example.com", "Olá"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[case("/robots.txt", "Sitemap: https://portfolio.example/sitemap.xml")]
#[case("/sitemap.xml", "<loc>https://portfolio.example/</loc>")]
#[actix_web::test]
async fn crawler_files_are_cached_for_a_day(#[case] uri: &str, #[case] expected: &str) {
    let app = public_app!(memory_state(Arc::new(InMemoryContentStore::default())));

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(cache.as_deref(), Some(PUBLIC_ONE_DAY));
    let body = actix_test::read_body(response).await;
    let text = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(text.contains(expected), "{text}");
}

#[actix_web::test]
async fn test_page_requires_an_administrator() {
    let app = public_app!(memory_state(Arc::new(InMemoryContentStore::default())));

    let request = actix_test::TestRequest::get().uri("/test/").to_request();
    let anonymous = actix_test::call_service(&app, request).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
        .to_request();
    let login_response = actix_test::call_service(&app, login).await;
    assert_eq!(login_response.status(), StatusCode::OK);
    let cookie = session_cookie(&login_response);

    let authed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/test/").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(authed.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(authed).await;
    assert_eq!(body["admin"], "admin");
}
