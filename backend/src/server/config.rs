//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use portfolio::domain::ports::LoginService;
use portfolio::domain::{AdminSiteSettings, DisabledLoginService};
use portfolio::outbound::persistence::DbPool;

/// Builder-style configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) login: Arc<dyn LoginService>,
    pub(crate) admin_site: AdminSiteSettings,
    pub(crate) public_base_url: String,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            login: Arc::new(DisabledLoginService),
            admin_site: AdminSiteSettings::default(),
            public_base_url: String::from("http://localhost:8080"),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Serve content from PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_login(mut self, login: Arc<dyn LoginService>) -> Self {
        self.login = login;
        self
    }

    /// Admin branding and the absolute URL used by the crawler files.
    #[must_use]
    pub fn with_site(
        mut self,
        admin_site: AdminSiteSettings,
        public_base_url: impl Into<String>,
    ) -> Self {
        self.admin_site = admin_site;
        self.public_base_url = public_base_url.into();
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
