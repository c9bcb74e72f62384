//! Integration usage log HTTP handlers.
//!
//! ```text
//! GET /{source}/log?take=50&skip=0
//! ```

use actix_web::{HttpRequest, get, web};
use pagination::{PageParams, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UsageLogEntry;
use crate::domain::ports::{ListUsageLogsRequest, ListUsageLogsResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, RejectedEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Usage log entry payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogEntryBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub member_email: String,
    #[schema(example = "osv")]
    pub source: String,
    pub status_code: Option<i32>,
    pub request_path: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<UsageLogEntry> for UsageLogEntryBody {
    fn from(value: UsageLogEntry) -> Self {
        Self {
            id: value.id.to_string(),
            member_email: value.member_email.into(),
            source: value.source.as_str().to_owned(),
            status_code: value.status_code,
            request_path: value.request_path,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Successful usage log page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsageLogsResponseBody {
    #[schema(example = true)]
    pub ok: bool,
    pub results: Vec<UsageLogEntryBody>,
}

impl From<ListUsageLogsResponse> for UsageLogsResponseBody {
    fn from(value: ListUsageLogsResponse) -> Self {
        Self {
            ok: true,
            results: value.results.into_iter().map(Into::into).collect(),
        }
    }
}

/// List the caller's usage log for one upstream feed, newest first.
#[utoipa::path(
    get,
    path = "/{source}/log",
    params(
        ("source" = String, Path, description = "Feed name: osv, first, vulncheck or github (case-insensitive)"),
        ("take" = Option<String>, Query, description = "Page size; defaults to 50, capped at 500"),
        ("skip" = Option<String>, Query, description = "Rows to skip; defaults to 0")
    ),
    responses(
        (status = 200, description = "Usage log page", body = UsageLogsResponseBody),
        (status = 400, description = "Invalid log source", body = ErrorEnvelopeSchema),
        (status = 401, description = "Session rejected", body = RejectedEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["usage-logs"],
    operation_id = "listUsageLogs",
    security(("SessionToken" = []))
)]
#[get("/{source}/log")]
pub async fn list_usage_logs(
    state: web::Data<HttpState>,
    auth: Authenticated,
    source: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<web::Json<UsageLogsResponseBody>> {
    let session = auth.into_inner();
    // Repeated parameters keep their first value.
    let params = PageParams::from_query_string(req.query_string());
    let request = ListUsageLogsRequest {
        member_email: session.member_email().clone(),
        source: source.into_inner(),
        page: PageRequest::from(&params),
    };

    let response = state.usage_logs.list_usage_logs(request).await?;
    Ok(web::Json(response.into()))
}

#[cfg(test)]
#[path = "usage_logs_tests.rs"]
mod tests;
