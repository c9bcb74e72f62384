//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every Diesel and pool failure is mapped onto the owning port's
//!   connection/query error.
//!
//! # Example
//!
//! ```ignore
//! use vulnetix_backend::outbound::persistence::{DbPool, DieselSpdxRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/vulnetix")).await?;
//! let repo = DieselSpdxRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_session_verifier;
mod diesel_spdx_repository;
mod diesel_usage_log_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_session_verifier::DieselSessionVerifier;
pub use diesel_spdx_repository::DieselSpdxRepository;
pub use diesel_usage_log_repository::DieselUsageLogRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
