//! Port for reading integration usage log entries.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{LogSource, MemberEmail, UsageLogEntry};

use super::define_port_error;

define_port_error! {
    /// Errors raised by usage log repository adapters.
    pub enum UsageLogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "usage log repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "usage log repository query failed: {message}",
    }
}

/// Port for paging through a member's usage log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageLogRepository: Send + Sync {
    /// List entries recorded for `member_email` against `source`.
    ///
    /// Results are ordered newest first (`created_at DESC`, then `id DESC`)
    /// and windowed by `page`.
    async fn list_for_member(
        &self,
        member_email: &MemberEmail,
        source: LogSource,
        page: PageRequest,
    ) -> Result<Vec<UsageLogEntry>, UsageLogRepositoryError>;
}

/// Fixture repository with no recorded usage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsageLogRepository;

#[async_trait]
impl UsageLogRepository for FixtureUsageLogRepository {
    async fn list_for_member(
        &self,
        _member_email: &MemberEmail,
        _source: LogSource,
        _page: PageRequest,
    ) -> Result<Vec<UsageLogEntry>, UsageLogRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let repo = FixtureUsageLogRepository;
        let email = MemberEmail::new("ada@example.com").expect("valid email");

        let listed = repo
            .list_for_member(&email, LogSource::Osv, PageRequest::default())
            .await
            .expect("fixture list succeeds");

        assert!(listed.is_empty());
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = UsageLogRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
