//! Tests for the usage log service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::{always, eq};
use pagination::PageRequest;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ports::MockUsageLogRepository;
use crate::domain::{ErrorCode, MemberEmail, UsageLogEntry};

#[fixture]
fn member() -> MemberEmail {
    MemberEmail::new("ada@example.com").expect("valid email")
}

fn request(member: &MemberEmail, source: &str, page: PageRequest) -> ListUsageLogsRequest {
    ListUsageLogsRequest {
        member_email: member.clone(),
        source: source.to_owned(),
        page,
    }
}

fn entry(member: &MemberEmail, minutes_ago: i64) -> UsageLogEntry {
    UsageLogEntry {
        id: Uuid::new_v4(),
        member_email: member.clone(),
        source: LogSource::Github,
        status_code: Some(200),
        request_path: Some("/advisories".to_owned()),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[rstest]
#[tokio::test]
async fn lists_entries_for_normalised_source(member: MemberEmail) {
    let expected = vec![entry(&member, 1), entry(&member, 5)];
    let returned = expected.clone();
    let page = PageRequest::new(10, 0);

    let mut repo = MockUsageLogRepository::new();
    repo.expect_list_for_member()
        .with(eq(member.clone()), eq(LogSource::Github), eq(page))
        .times(1)
        .return_once(move |_, _, _| Ok(returned));

    let service = UsageLogQueryService::new(Arc::new(repo));
    let response = service
        .list_usage_logs(request(&member, "GitHub", page))
        .await
        .expect("list succeeds");

    assert_eq!(response.results, expected);
}

#[rstest]
#[case("nvd")]
#[case("")]
#[case("osv-legacy")]
#[tokio::test]
async fn unknown_source_is_rejected_without_reading(member: MemberEmail, #[case] source: &str) {
    let mut repo = MockUsageLogRepository::new();
    repo.expect_list_for_member().times(0);

    let service = UsageLogQueryService::new(Arc::new(repo));
    let error = service
        .list_usage_logs(request(&member, source, PageRequest::default()))
        .await
        .expect_err("invalid source");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "Invalid log source");
    let details = error.details().expect("details attached");
    assert_eq!(details["field"], "source");
}

#[rstest]
#[case(UsageLogRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UsageLogRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    member: MemberEmail,
    #[case] failure: UsageLogRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUsageLogRepository::new();
    repo.expect_list_for_member()
        .with(always(), always(), always())
        .times(1)
        .return_once(move |_, _, _| Err(failure));

    let service = UsageLogQueryService::new(Arc::new(repo));
    let error = service
        .list_usage_logs(request(&member, "osv", PageRequest::default()))
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}
