//! Wiring of domain services onto the configured content store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use portfolio::domain::ports::{
    CatalogueRepository, LoginService, MessageRepository, PageContentRepository,
    SingletonRepository, UserRepository,
};
use portfolio::domain::{
    CatalogueContentService, ContactIntakeService, PageContextService, SingletonContentService,
    UserAccountService,
};
use portfolio::inbound::http::state::{HttpState, HttpStatePorts};
use portfolio::outbound::memory::InMemoryContentStore;
use portfolio::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselMessageRepository, DieselPageContentRepository,
    DieselSingletonRepository, DieselUserRepository,
};
use tracing::info;

use super::ServerConfig;

/// Repositories backing each domain service.
struct Stores<P, M, S, C, U> {
    page: Arc<P>,
    messages: Arc<M>,
    singletons: Arc<S>,
    catalogue: Arc<C>,
    users: Arc<U>,
}

type DieselStores = Stores<
    DieselPageContentRepository,
    DieselMessageRepository,
    DieselSingletonRepository,
    DieselCatalogueRepository,
    DieselUserRepository,
>;

type MemoryStores = Stores<
    InMemoryContentStore,
    InMemoryContentStore,
    InMemoryContentStore,
    InMemoryContentStore,
    InMemoryContentStore,
>;

fn diesel_stores(pool: &DbPool) -> DieselStores {
    Stores {
        page: Arc::new(DieselPageContentRepository::new(pool.clone())),
        messages: Arc::new(DieselMessageRepository::new(pool.clone())),
        singletons: Arc::new(DieselSingletonRepository::new(pool.clone())),
        catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
    }
}

fn memory_stores() -> MemoryStores {
    let store = Arc::new(InMemoryContentStore::new());
    Stores {
        page: store.clone(),
        messages: store.clone(),
        singletons: store.clone(),
        catalogue: store.clone(),
        users: store,
    }
}

fn ports<P, M, S, C, U>(
    stores: Stores<P, M, S, C, U>,
    login: Arc<dyn LoginService>,
) -> HttpStatePorts
where
    P: PageContentRepository + 'static,
    M: MessageRepository + 'static,
    S: SingletonRepository + 'static,
    C: CatalogueRepository + 'static,
    U: UserRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let intake = Arc::new(ContactIntakeService::new(stores.messages, clock.clone()));
    HttpStatePorts {
        page: Arc::new(PageContextService::new(stores.page)),
        contact: intake.clone(),
        messages: intake,
        singletons: Arc::new(SingletonContentService::new(stores.singletons, clock.clone())),
        catalogue: Arc::new(CatalogueContentService::new(stores.catalogue, clock.clone())),
        users: Arc::new(UserAccountService::new(stores.users, clock)),
        login,
    }
}

/// Build the shared HTTP state, preferring PostgreSQL when a pool is set.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("serving content from PostgreSQL");
            ports(diesel_stores(pool), config.login.clone())
        }
        None => {
            info!("no database configured; serving content from memory");
            ports(memory_stores(), config.login.clone())
        }
    };
    web::Data::new(HttpState::new(
        ports,
        config.admin_site.clone(),
        config.public_base_url.clone(),
    ))
}
