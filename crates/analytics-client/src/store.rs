//! Observable analytics state.

use std::sync::{PoisonError, RwLock};

use tracing::{debug, error};

use crate::client::AnalyticsSource;
use crate::snapshot::AnalyticsSnapshot;

/// What a call to [`AnalyticsStore::fetch_analytics`] did to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot was replaced with freshly fetched data.
    Updated,
    /// The backend answered with an error message; snapshot unchanged.
    Rejected,
    /// The response carried neither data nor an error; snapshot unchanged.
    Ignored,
    /// Transport or decoding failed; snapshot unchanged.
    Failed,
}

/// Analytics store mirroring the backend document into local state.
///
/// Concurrent fetches are not serialised: each completed fetch replaces the
/// whole snapshot under one write lock, so the last completion wins.
pub struct AnalyticsStore<S> {
    source: S,
    snapshot: RwLock<AnalyticsSnapshot>,
}

impl<S> AnalyticsStore<S> {
    /// Create a store with the initial empty snapshot.
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: RwLock::new(AnalyticsSnapshot::default()),
        }
    }

    /// Current snapshot of all five aggregates.
    #[must_use]
    pub fn analytics(&self) -> AnalyticsSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, snapshot: AnalyticsSnapshot) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}

impl<S: AnalyticsSource> AnalyticsStore<S> {
    /// Fetch the analytics document for `session_token` and mirror it.
    ///
    /// Never fails: errors are logged and reported as
    /// [`FetchOutcome::Rejected`] or [`FetchOutcome::Failed`] with the previous
    /// snapshot left in place.
    pub async fn fetch_analytics(&self, session_token: &str) -> FetchOutcome {
        let envelope = match self.source.fetch(session_token).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(error = %err, "analytics fetch failed");
                return FetchOutcome::Failed;
            }
        };

        if let Some(message) = envelope.error_message() {
            error!(reason = %message, "analytics request rejected");
            return FetchOutcome::Rejected;
        }

        match envelope.accepted_data() {
            Some(data) => {
                self.replace(data.into());
                FetchOutcome::Updated
            }
            None => {
                debug!(ok = ?envelope.ok, "analytics response carried no data");
                FetchOutcome::Ignored
            }
        }
    }
}
