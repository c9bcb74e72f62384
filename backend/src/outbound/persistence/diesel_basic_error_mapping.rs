//! Shared Diesel error mapping for the Vulnetix repositories.
//!
//! Every repository port distinguishes "store unreachable" (connection) from
//! "store answered badly" (query). Statement timeouts count as unreachable so
//! that callers see a retryable 503 rather than an internal error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Postgres reports cancelled statements with SQLSTATE 57014 and this text.
const STATEMENT_TIMEOUT_MARKER: &str = "statement timeout";

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn is_statement_timeout(message: &str) -> bool {
    message.to_ascii_lowercase().contains(STATEMENT_TIMEOUT_MARKER)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures become query errors; closed
/// connections and cancelled statements become connection errors.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, info) if is_statement_timeout(info.message()) => {
            connection("database statement timed out")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}
