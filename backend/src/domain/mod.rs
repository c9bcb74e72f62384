//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities for sessions, usage logs, and SPDX
//! documents, the driving/driven ports adapters plug into, and the services
//! implementing the driving ports. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Session, SessionToken, AuthResult: request authentication primitives.
//! - LogSource, UsageLogEntry: integration usage log reads.
//! - SpdxId, SpdxDeletion: SPDX cascade delete.
//! - UsageLogQueryService, SpdxDeletionService: driving port implementations.

pub mod auth;
pub mod error;
pub mod ports;
pub mod spdx;
pub mod spdx_deletion_service;
pub mod trace_id;
pub mod usage_log;
pub mod usage_log_service;

pub use self::auth::{
    AuthResult, AuthValidationError, MemberEmail, SESSION_TOKEN_HEADER, Session, SessionToken,
    SessionVerification,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::spdx::{
    Artifact, Link, NOT_FOUND_MESSAGE, SpdxDeletion, SpdxId, SpdxIdValidationError, SpdxInfo,
};
pub use self::spdx_deletion_service::SpdxDeletionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::usage_log::{INVALID_LOG_SOURCE_MESSAGE, LogSource, UnknownLogSource, UsageLogEntry};
pub use self::usage_log_service::UsageLogQueryService;
