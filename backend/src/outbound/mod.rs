//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. Today the only adapter family is
//! PostgreSQL persistence.

pub mod persistence;
