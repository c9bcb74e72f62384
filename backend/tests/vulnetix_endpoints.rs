//! End-to-end behaviour of the usage log and SPDX endpoints.
//!
//! Drives the real Actix handlers and domain services over an in-memory
//! store, so the assertions cover authentication, validation, paging and
//! cascade semantics without a database.

#[path = "vulnetix_endpoints/doubles.rs"]
mod doubles;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::Value;
use uuid::Uuid;

use doubles::InMemoryStore;
use vulnetix_backend::Trace;
use vulnetix_backend::domain::{
    Artifact, Link, LogSource, MemberEmail, SESSION_TOKEN_HEADER, SpdxDeletionService, SpdxId,
    SpdxInfo, UsageLogEntry, UsageLogQueryService,
};
use vulnetix_backend::inbound::http::spdx::delete_spdx;
use vulnetix_backend::inbound::http::state::HttpState;
use vulnetix_backend::inbound::http::usage_logs::list_usage_logs;

const TOKEN: &str = "kid-ada";
const EXPIRED_TOKEN: &str = "kid-ada-old";
const MEMBER: &str = "ada@example.com";
const OTHER_MEMBER: &str = "grace@example.com";

#[fixture]
fn store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::default();
    store.add_session(TOKEN, MEMBER, Utc::now() + Duration::hours(1));
    store.add_session(EXPIRED_TOKEN, MEMBER, Utc::now() - Duration::minutes(1));
    Arc::new(store)
}

async fn app(
    store: Arc<InMemoryStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    let state = HttpState::new(
        store.clone(),
        Arc::new(UsageLogQueryService::new(store.clone())),
        Arc::new(SpdxDeletionService::new(store)),
    );
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(delete_spdx)
            .service(list_usage_logs),
    )
    .await
}

async fn send(
    store: &Arc<InMemoryStore>,
    request: test::TestRequest,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let service = app(store.clone()).await;
    let request = match token {
        Some(token) => request.insert_header((SESSION_TOKEN_HEADER, token)),
        None => request,
    };
    let res = test::call_service(&service, request.to_request()).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

fn usage(member: &str, source: LogSource, minute: i64) -> UsageLogEntry {
    UsageLogEntry {
        id: Uuid::new_v4(),
        member_email: MemberEmail::new(member).expect("valid email"),
        source,
        status_code: Some(200),
        request_path: Some(format!("/v1/query/{minute}")),
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
            + Duration::minutes(minute),
    }
}

fn seed_document(store: &InMemoryStore, raw_id: &str, link_count: u128) -> (SpdxId, Uuid) {
    let spdx_id = SpdxId::new(raw_id).expect("valid id");
    let artifact_uuid = Uuid::new_v4();
    store.add_document(
        SpdxInfo {
            spdx_id: spdx_id.clone(),
            spdx_version: "SPDX-2.3".to_owned(),
            name: "web-app".to_owned(),
            document_namespace: Some("https://example.com/web-app".to_owned()),
            member_email: Some(MEMBER.to_owned()),
            created_at: Utc::now(),
        },
        Some(Artifact {
            uuid: artifact_uuid,
            display_identifier: "pkg:npm/web-app@1.0.0".to_owned(),
            download_location: None,
            spdx_id: Some(spdx_id.clone()),
            created_at: Utc::now(),
        }),
        (0..link_count)
            .map(|n| Link {
                id: Uuid::new_v4(),
                url: format!("https://example.com/download/{n}"),
                artifact_uuid,
            })
            .collect(),
    );
    (spdx_id, artifact_uuid)
}

#[rstest]
#[actix_web::test]
async fn usage_log_page_is_scoped_and_newest_first(store: Arc<InMemoryStore>) {
    for minute in 0..15 {
        store.add_usage(usage(MEMBER, LogSource::Osv, minute));
    }
    store.add_usage(usage(MEMBER, LogSource::Github, 99));
    store.add_usage(usage(OTHER_MEMBER, LogSource::Osv, 100));

    let (status, body) = send(
        &store,
        test::TestRequest::get().uri("/osv/log?take=10&skip=0"),
        Some(TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], Value::Bool(true));
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|row| row["memberEmail"] == MEMBER));
    assert!(results.iter().all(|row| row["source"] == "osv"));
    let stamps: Vec<&str> = results
        .iter()
        .map(|row| row["createdAt"].as_str().expect("timestamp"))
        .collect();
    let mut sorted = stamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted);
}

#[rstest]
#[actix_web::test]
async fn usage_log_skip_reaches_older_rows(store: Arc<InMemoryStore>) {
    for minute in 0..15 {
        store.add_usage(usage(MEMBER, LogSource::First, minute));
    }

    let (status, body) = send(
        &store,
        test::TestRequest::get().uri("/FIRST/log?take=10&skip=10"),
        Some(TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(5));
}

#[rstest]
#[actix_web::test]
async fn unknown_source_is_rejected_without_reading(store: Arc<InMemoryStore>) {
    let (status, body) = send(
        &store,
        test::TestRequest::get().uri("/nvd/log"),
        Some(TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], Value::Bool(false));
    assert_eq!(body["error"]["message"], "Invalid log source");
    assert_eq!(store.reads(), 0);
}

#[rstest]
#[case(None, "FORBIDDEN")]
#[case(Some("kid-unknown"), "REVOKED")]
#[case(Some(EXPIRED_TOKEN), "EXPIRED")]
#[actix_web::test]
async fn rejected_sessions_never_touch_the_store(
    store: Arc<InMemoryStore>,
    #[case] token: Option<&str>,
    #[case] expected: &str,
) {
    seed_document(&store, "SPDXRef-guarded", 1);

    let (list_status, list_body) =
        send(&store, test::TestRequest::get().uri("/osv/log"), token).await;
    let (delete_status, delete_body) = send(
        &store,
        test::TestRequest::delete().uri("/spdx/SPDXRef-guarded"),
        token,
    )
    .await;

    assert_eq!(list_status, StatusCode::UNAUTHORIZED);
    assert_eq!(delete_status, StatusCode::UNAUTHORIZED);
    assert_eq!(list_body["ok"], Value::Bool(false));
    assert_eq!(list_body["result"], expected);
    assert_eq!(delete_body["result"], expected);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.deletes(), 0);
    assert_eq!(store.link_count(), 1);
}

#[rstest]
#[actix_web::test]
async fn cascade_removes_links_artifact_and_document(store: Arc<InMemoryStore>) {
    let (spdx_id, artifact_uuid) = seed_document(&store, "SPDXRef-web-app", 3);

    let (status, body) = send(
        &store,
        test::TestRequest::delete().uri("/spdx/SPDXRef-web-app"),
        Some(TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], Value::Bool(true));
    assert_eq!(body["spdxId"], "SPDXRef-web-app");
    assert_eq!(body["artifactUuid"], artifact_uuid.to_string());
    assert_eq!(body["linkIds"].as_array().map(Vec::len), Some(3));
    assert!(!store.has_document(&spdx_id));
    assert_eq!(store.artifact_count(), 0);
    assert_eq!(store.link_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn deleting_twice_reports_not_found(store: Arc<InMemoryStore>) {
    seed_document(&store, "SPDXRef-once", 2);
    let request = || test::TestRequest::delete().uri("/spdx/SPDXRef-once");

    let (first, _) = send(&store, request(), Some(TOKEN)).await;
    let (second, body) = send(&store, request(), Some(TOKEN)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], Value::Bool(false));
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "not found");
}
