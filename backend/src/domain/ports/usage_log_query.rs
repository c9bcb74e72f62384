//! Driving port for usage log reads.
//!
//! Inbound adapters hand over the authenticated member together with the raw
//! source segment and page window; source validation happens behind the port.

use async_trait::async_trait;
use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, MemberEmail, UsageLogEntry};

/// Request to list a member's usage log for one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUsageLogsRequest {
    pub member_email: MemberEmail,
    /// Feed name as it appeared in the path, before allow-list checks.
    pub source: String,
    pub page: PageRequest,
}

/// Page of usage log entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsageLogsResponse {
    pub results: Vec<UsageLogEntry>,
}

/// Driving port for usage log reads.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), vulnetix_backend::domain::Error> {
/// use vulnetix_backend::domain::MemberEmail;
/// use vulnetix_backend::domain::ports::{
///     FixtureUsageLogQuery, ListUsageLogsRequest, UsageLogQuery,
/// };
///
/// let query = FixtureUsageLogQuery;
/// let request = ListUsageLogsRequest {
///     member_email: MemberEmail::new("ada@example.com").expect("valid email"),
///     source: "osv".to_owned(),
///     page: pagination::PageRequest::default(),
/// };
/// let response = query.list_usage_logs(request).await?;
/// assert!(response.results.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageLogQuery: Send + Sync {
    /// List usage log entries for the requesting member.
    ///
    /// Fails with `invalid_request` when `source` is outside the allow-list.
    async fn list_usage_logs(
        &self,
        request: ListUsageLogsRequest,
    ) -> Result<ListUsageLogsResponse, Error>;
}

/// Fixture query returning no entries for any accepted source.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsageLogQuery;

#[async_trait]
impl UsageLogQuery for FixtureUsageLogQuery {
    async fn list_usage_logs(
        &self,
        request: ListUsageLogsRequest,
    ) -> Result<ListUsageLogsResponse, Error> {
        request
            .source
            .parse::<crate::domain::LogSource>()
            .map_err(|_| Error::invalid_request(crate::domain::INVALID_LOG_SOURCE_MESSAGE))?;
        Ok(ListUsageLogsResponse {
            results: Vec::new(),
        })
    }
}
