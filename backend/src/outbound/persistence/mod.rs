//! PostgreSQL adapters built on Diesel, `diesel-async` and `bb8`.
//!
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module; adapters translate them into domain types and map every
//! Diesel or pool failure into the matching port error.
//!
//! ```ignore
//! use portfolio::outbound::persistence::{DbPool, DieselSingletonRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/portfolio")).await?;
//! let singletons = DieselSingletonRepository::new(pool.clone());
//! ```

mod diesel_catalogue_repository;
mod diesel_message_repository;
mod diesel_page_content_repository;
mod diesel_singleton_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_message_repository::DieselMessageRepository;
pub use diesel_page_content_repository::DieselPageContentRepository;
pub use diesel_singleton_repository::DieselSingletonRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_async,
};
pub use pool::{DbPool, PoolConfig, PoolError};
