//! Diesel and pool failures translated into port error constructors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Any pool failure is a connection problem from the port's point of view.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Closed connections map to `connection`; everything else to `query`.
///
/// The driver message is logged at debug level and never copied into the
/// port error.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

pub(crate) fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Column named by a unique violation, resolved from its constraint name.
///
/// Constraint names follow PostgreSQL's `<table>_<column>_key` convention.
pub(crate) fn unique_violation_field(
    error: &DieselError,
    columns: &[&'static str],
) -> Option<&'static str> {
    constraint_column(error, DatabaseErrorKind::UniqueViolation, "key", columns)
}

/// Column named by a foreign key violation (`<table>_<column>_fkey`).
pub(crate) fn foreign_key_violation_field(
    error: &DieselError,
    columns: &[&'static str],
) -> Option<&'static str> {
    constraint_column(error, DatabaseErrorKind::ForeignKeyViolation, "fkey", columns)
}

fn constraint_column(
    error: &DieselError,
    wanted: DatabaseErrorKind,
    suffix: &str,
    columns: &[&'static str],
) -> Option<&'static str> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    if std::mem::discriminant(kind) != std::mem::discriminant(&wanted) {
        return None;
    }
    let constraint = info.constraint_name()?;
    columns
        .iter()
        .copied()
        .find(|column| constraint.ends_with(&format!("_{column}_{suffix}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error(
            error,
            |m| Mapped::Query(m.to_owned()),
            |m| Mapped::Connection(m.to_owned()),
        )
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(map(error), Mapped::Connection("database connection error".into()));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("users_username_check".to_owned()),
        ),
        "database error"
    )]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] expected: &str) {
        assert_eq!(map(error), Mapped::Query(expected.into()));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped: Mapped = map_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".into()));
    }

    #[rstest]
    fn non_unique_errors_name_no_field() {
        assert_eq!(
            unique_violation_field(&DieselError::NotFound, &["email", "username"]),
            None
        );
    }

    #[rstest]
    fn unique_violations_are_not_foreign_key_violations() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert_eq!(foreign_key_violation_field(&error, &["group_id"]), None);
    }
}
