//! Portfolio server entry point: configuration, store selection and HTTP.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portfolio::inbound::http::health::HealthState;
use portfolio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_async};
use portfolio::settings::{BuildMode, PortfolioSettings};
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortfolioSettings::load().wrap_err("failed to load configuration")?;
    let session = settings
        .session_settings(BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;

    let config = ServerConfig::new(session.key, session.cookie_secure, session.same_site, bind_addr)
        .with_login(settings.login_service()?)
        .with_site(settings.admin_site(), settings.public_base_url());

    let config = match settings.database_url() {
        Some(url) => {
            if settings.run_migrations {
                let applied = run_pending_migrations_async(url.to_owned())
                    .await
                    .wrap_err("failed to apply migrations")?;
                info!(count = applied.len(), "migrations applied");
            }
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
                .await
                .map_err(|err| eyre!("failed to build database pool: {err}"))?;
            config.with_db_pool(pool)
        }
        None => config,
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(make_metrics));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "portfolio server listening");
    server.await?;
    Ok(())
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("portfolio")
        .registry(prometheus::Registry::new())
        .endpoint("/metrics")
        .build()
        .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))
}

/// Serve without metrics rather than refuse to start.
#[cfg(feature = "metrics")]
fn initialize_metrics<E, F>(make: F) -> Option<PrometheusMetrics>
where
    E: std::fmt::Display,
    F: FnOnce() -> std::result::Result<PrometheusMetrics, E>,
{
    make()
        .inspect_err(|error| warn!(error = %error, "metrics disabled"))
        .ok()
}
