//! PostgreSQL-backed `SingletonRepository`.
//!
//! Activating writes run in one transaction that first takes
//! `pg_advisory_xact_lock` keyed by the singleton kind, so concurrent
//! writers of one kind queue behind each other and the last to commit wins.
//! The partial unique index on `is_active` backs this up at the store level.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::BigInt;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AboutRow, HeroRow, MetaDataRow};
use super::pool::{DbPool, PoolError};
use super::schema::{abouts, heroes, metadata};
use crate::domain::content::{SingletonKind, SingletonRecord};
use crate::domain::ports::{SingletonRepository, SingletonRepositoryError, WriteMode};

/// Diesel-backed store for metadata, hero and about rows.
#[derive(Clone)]
pub struct DieselSingletonRepository {
    pool: DbPool,
}

impl DieselSingletonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Advisory lock key for `kind`; stable across processes.
pub(crate) fn advisory_lock_key(kind: SingletonKind) -> i64 {
    // "pfolio" in the high bytes keeps clear of other lock users.
    const BASE: i64 = 0x7066_6f6c_696f_0000;
    BASE + match kind {
        SingletonKind::MetaData => 1,
        SingletonKind::Hero => 2,
        SingletonKind::About => 3,
    }
}

fn map_pool(error: PoolError) -> SingletonRepositoryError {
    map_pool_error(error, SingletonRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> SingletonRepositoryError {
    map_diesel_error(
        error,
        SingletonRepositoryError::query,
        SingletonRepositoryError::connection,
    )
}

/// Transaction failure: either the store failed or the update matched no row.
enum WriteFailure {
    Store(DieselError),
    Missing(Uuid),
}

impl From<DieselError> for WriteFailure {
    fn from(error: DieselError) -> Self {
        Self::Store(error)
    }
}

impl From<WriteFailure> for SingletonRepositoryError {
    fn from(failure: WriteFailure) -> Self {
        match failure {
            WriteFailure::Store(error) => map_diesel(error),
            WriteFailure::Missing(id) => Self::not_found(id),
        }
    }
}

/// Generates `deactivate_<table>` and `write_<table>` for one singleton table.
macro_rules! singleton_table_ops {
    ($table:ident, $row:ty) => {
        paste::paste! {
            async fn [<deactivate_ $table>](
                conn: &mut AsyncPgConnection,
                keep: Uuid,
            ) -> Result<usize, DieselError> {
                diesel::update(
                    $table::table
                        .filter($table::id.ne(keep))
                        .filter($table::is_active.eq(true)),
                )
                .set($table::is_active.eq(false))
                .execute(conn)
                .await
            }

            async fn [<write_ $table>](
                conn: &mut AsyncPgConnection,
                row: &$row,
                mode: WriteMode,
            ) -> Result<usize, DieselError> {
                if row.is_active {
                    let cleared = [<deactivate_ $table>](conn, row.id).await?;
                    debug!(table = stringify!($table), cleared, "deactivated sibling rows");
                }
                match mode {
                    WriteMode::Insert => {
                        diesel::insert_into($table::table)
                            .values(row)
                            .execute(conn)
                            .await
                    }
                    WriteMode::Update => {
                        diesel::update($table::table.find(row.id))
                            .set(row)
                            .execute(conn)
                            .await
                    }
                }
            }
        }
    };
}

singleton_table_ops!(metadata, MetaDataRow);
singleton_table_ops!(heroes, HeroRow);
singleton_table_ops!(abouts, AboutRow);

async fn lock_kind(conn: &mut AsyncPgConnection, kind: SingletonKind) -> Result<(), DieselError> {
    diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
        .bind::<BigInt, _>(advisory_lock_key(kind))
        .execute(conn)
        .await
        .map(|_| ())
}

async fn write_record(
    conn: &mut AsyncPgConnection,
    record: &SingletonRecord,
    mode: WriteMode,
) -> Result<usize, DieselError> {
    match record {
        SingletonRecord::MetaData(row) => write_metadata(conn, &MetaDataRow::from(row), mode).await,
        SingletonRecord::Hero(row) => write_heroes(conn, &HeroRow::from(row), mode).await,
        SingletonRecord::About(row) => write_abouts(conn, &AboutRow::from(row), mode).await,
    }
}

#[async_trait]
impl SingletonRepository for DieselSingletonRepository {
    async fn save_exclusive(
        &self,
        record: &SingletonRecord,
        mode: WriteMode,
    ) -> Result<(), SingletonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        conn.transaction(|conn| {
            async move {
                if record.is_active() {
                    lock_kind(conn, record.kind()).await?;
                }
                let written = write_record(conn, record, mode).await?;
                if written == 0 {
                    return Err(WriteFailure::Missing(record.id()));
                }
                Ok::<(), WriteFailure>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(SingletonRepositoryError::from)
    }

    async fn list(
        &self,
        kind: SingletonKind,
    ) -> Result<Vec<SingletonRecord>, SingletonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows = match kind {
            SingletonKind::MetaData => metadata::table
                .select(MetaDataRow::as_select())
                .order_by((metadata::title.asc().nulls_last(), metadata::id))
                .load(&mut conn)
                .await
                .map(|rows| {
                    rows.into_iter()
                        .map(|r| SingletonRecord::MetaData(r.into()))
                        .collect()
                }),
            SingletonKind::Hero => heroes::table
                .select(HeroRow::as_select())
                .order_by((heroes::full_name.asc().nulls_last(), heroes::id))
                .load(&mut conn)
                .await
                .map(|rows| rows.into_iter().map(|r| SingletonRecord::Hero(r.into())).collect()),
            SingletonKind::About => abouts::table
                .select(AboutRow::as_select())
                .order_by((abouts::updated_at.desc(), abouts::id))
                .load(&mut conn)
                .await
                .map(|rows| rows.into_iter().map(|r| SingletonRecord::About(r.into())).collect()),
        };
        rows.map_err(map_diesel)
    }
}
