//! Dependencies shared by every HTTP handler.
//!
//! Handlers take `web::Data<HttpState>` and reach the domain only through
//! driving ports, so tests can swap in mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::AdminSiteSettings;
use crate::domain::ports::{
    CatalogueContentCommand, ContactIntakeCommand, LoginService, MessagesQuery, PageContextQuery,
    SingletonContentCommand, UserAccountsCommand,
};

/// Port implementations bundled for [`HttpState::new`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub page: Arc<dyn PageContextQuery>,
    pub contact: Arc<dyn ContactIntakeCommand>,
    pub messages: Arc<dyn MessagesQuery>,
    pub singletons: Arc<dyn SingletonContentCommand>,
    pub catalogue: Arc<dyn CatalogueContentCommand>,
    pub users: Arc<dyn UserAccountsCommand>,
    pub login: Arc<dyn LoginService>,
}

#[derive(Clone)]
pub struct HttpState {
    pub page: Arc<dyn PageContextQuery>,
    pub contact: Arc<dyn ContactIntakeCommand>,
    pub messages: Arc<dyn MessagesQuery>,
    pub singletons: Arc<dyn SingletonContentCommand>,
    pub catalogue: Arc<dyn CatalogueContentCommand>,
    pub users: Arc<dyn UserAccountsCommand>,
    pub login: Arc<dyn LoginService>,
    pub admin_site: AdminSiteSettings,
    /// Site root without a trailing slash, e.g. `https://example.com`.
    pub public_base_url: String,
}

impl HttpState {
    pub fn new(
        ports: HttpStatePorts,
        admin_site: AdminSiteSettings,
        public_base_url: impl Into<String>,
    ) -> Self {
        let HttpStatePorts {
            page,
            contact,
            messages,
            singletons,
            catalogue,
            users,
            login,
        } = ports;
        let public_base_url = public_base_url.into().trim_end_matches('/').to_owned();
        Self {
            page,
            contact,
            messages,
            singletons,
            catalogue,
            users,
            login,
            admin_site,
            public_base_url,
        }
    }
}
