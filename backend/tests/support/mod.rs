//! Shared helpers for the Diesel adapter integration suites.
//!
//! Each suite provisions a throwaway database cloned from a migrated
//! template on one embedded PostgreSQL cluster shared by the test binary.

pub mod cluster_skip;
pub mod embedded_postgres;

/// Render a `postgres` error with the server message and SQLSTATE.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
