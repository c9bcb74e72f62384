//! Correlation id shared by a request's log lines, error payloads and
//! `trace-id` response header.
//!
//! The trace middleware opens one scope per request. Domain errors and auth
//! rejections read the active id back from that scope. Tokio task-locals do
//! not follow `tokio::spawn`, so work moved to another task has no id.

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// Identifier of one in-flight request.
///
/// # Examples
/// ```
/// use vulnetix_backend::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "handling request");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier for a new request.
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request currently being handled, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Drive `fut` with this identifier active.
    pub async fn run<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        ACTIVE.scope(self, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
