//! Shared helpers for the PostgreSQL-backed integration suites.
//!
//! Each test gets its own temporary database on one embedded cluster per
//! test binary, migrated with the embedded Diesel migrations. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

#![allow(dead_code, reason = "each suite uses a subset of the helpers")]

use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use portfolio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Render a `postgres` error with its SQLSTATE and detail.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster helper spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "portfolio_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// A migrated temporary database with a pool and a runtime to drive it.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    database: TemporaryDatabase,
}

impl TestDatabase {
    pub fn url(&self) -> &str {
        self.database.url()
    }

    /// Synchronous client for seeding and schema surgery.
    pub fn client(&self) -> Client {
        Client::connect(self.url(), NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    /// Run SQL statements, panicking with the database's own message.
    pub fn execute(&self, sql: &str) {
        self.client()
            .batch_execute(sql)
            .unwrap_or_else(|err| panic!("execute: {}", format_postgres_error(&err)));
    }
}

fn try_provision(max_size: u32) -> Result<TestDatabase, String> {
    let cluster = shared_cluster()?;
    let name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    run_pending_migrations(database.url()).map_err(|err| err.to_string())?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let config = PoolConfig::new(database.url())
        .with_max_size(max_size)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(TestDatabase {
        runtime,
        pool,
        database,
    })
}

/// Provision a migrated database, or `None` when the cluster is skipped.
pub fn provision(max_size: u32) -> Option<TestDatabase> {
    match try_provision(max_size) {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
