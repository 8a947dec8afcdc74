//! Helpers shared by the HTTP handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::domain::ports::FixtureLoginService;
use crate::domain::{
    AdminSiteSettings, CatalogueContentService, ContactIntakeService, PageContextService,
    SingletonContentService, UserAccountService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryContentStore;

/// Cookie session middleware with a fresh key and `Secure` off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// State wired to one in-memory store and the fixture login.
pub fn memory_state(store: Arc<InMemoryContentStore>) -> HttpState {
    let clock = Arc::new(DefaultClock);
    HttpState::new(
        HttpStatePorts {
            page: Arc::new(PageContextService::new(store.clone())),
            contact: Arc::new(ContactIntakeService::new(store.clone(), clock.clone())),
            messages: Arc::new(ContactIntakeService::new(store.clone(), clock.clone())),
            singletons: Arc::new(SingletonContentService::new(store.clone(), clock.clone())),
            catalogue: Arc::new(CatalogueContentService::new(store.clone(), clock.clone())),
            users: Arc::new(UserAccountService::new(store, clock)),
            login: Arc::new(FixtureLoginService),
        },
        AdminSiteSettings::default(),
        "https://portfolio.example",
    )
}
