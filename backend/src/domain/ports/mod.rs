//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod session_verifier;
mod spdx_command;
mod spdx_repository;
mod usage_log_query;
mod usage_log_repository;

#[cfg(test)]
pub use session_verifier::MockSessionVerifier;
pub use session_verifier::{FixtureSessionVerifier, SessionVerifier, SessionVerifierError};
#[cfg(test)]
pub use spdx_command::MockSpdxCommand;
pub use spdx_command::{DeleteSpdxRequest, FixtureSpdxCommand, SpdxCommand};
#[cfg(test)]
pub use spdx_repository::MockSpdxRepository;
pub use spdx_repository::{FixtureSpdxRepository, SpdxRepository, SpdxRepositoryError};
#[cfg(test)]
pub use usage_log_query::MockUsageLogQuery;
pub use usage_log_query::{
    FixtureUsageLogQuery, ListUsageLogsRequest, ListUsageLogsResponse, UsageLogQuery,
};
#[cfg(test)]
pub use usage_log_repository::MockUsageLogRepository;
pub use usage_log_repository::{
    FixtureUsageLogRepository, UsageLogRepository, UsageLogRepositoryError,
};
