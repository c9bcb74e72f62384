//! Usage log domain service.
//!
//! Implements the usage log driving port: validates the requested feed
//! against the allow-list before any repository access, then reads one page
//! of the member's entries.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    ListUsageLogsRequest, ListUsageLogsResponse, UsageLogQuery, UsageLogRepository,
    UsageLogRepositoryError,
};
use crate::domain::{Error, INVALID_LOG_SOURCE_MESSAGE, LogSource};

fn map_repository_error(error: UsageLogRepositoryError) -> Error {
    match error {
        UsageLogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("usage log repository unavailable: {message}"))
        }
        UsageLogRepositoryError::Query { message } => {
            Error::internal(format!("usage log repository error: {message}"))
        }
    }
}

/// Usage log service implementing [`UsageLogQuery`].
#[derive(Clone)]
pub struct UsageLogQueryService<R> {
    usage_log_repo: Arc<R>,
}

impl<R> UsageLogQueryService<R> {
    /// Create a new query service with the usage log repository.
    pub fn new(usage_log_repo: Arc<R>) -> Self {
        Self { usage_log_repo }
    }
}

#[async_trait]
impl<R> UsageLogQuery for UsageLogQueryService<R>
where
    R: UsageLogRepository,
{
    async fn list_usage_logs(
        &self,
        request: ListUsageLogsRequest,
    ) -> Result<ListUsageLogsResponse, Error> {
        let source = request.source.parse::<LogSource>().map_err(|_| {
            Error::invalid_request(INVALID_LOG_SOURCE_MESSAGE).with_details(json!({
                "field": "source",
                "allowed": LogSource::ALL.map(LogSource::as_str),
            }))
        })?;

        let results = self
            .usage_log_repo
            .list_for_member(&request.member_email, source, request.page)
            .await
            .map_err(map_repository_error)?;

        Ok(ListUsageLogsResponse { results })
    }
}

#[cfg(test)]
#[path = "usage_log_service_tests.rs"]
mod tests;
