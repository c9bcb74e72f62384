//! Presentation-side analytics client.
//!
//! [`AnalyticsStore`] performs one authenticated read of the backend's
//! pre-aggregated `/analytics` document and mirrors it into a local
//! [`AnalyticsSnapshot`]. Failures are logged and leave the previous snapshot
//! in place; callers observe what happened through [`FetchOutcome`].
//!
//! ```rust,ignore
//! use analytics_client::{AnalyticsStore, HttpAnalyticsSource};
//!
//! let source = HttpAnalyticsSource::new(&base_url, Duration::from_secs(5))?;
//! let store = AnalyticsStore::new(source);
//! store.fetch_analytics(&session_token).await;
//! let snapshot = store.analytics();
//! ```

mod client;
mod snapshot;
mod store;

pub use client::{
    AnalyticsEnvelope, AnalyticsSource, AnalyticsSourceError, HttpAnalyticsSource,
    SESSION_TOKEN_HEADER,
};
pub use snapshot::{AnalyticsData, AnalyticsSnapshot};
pub use store::{AnalyticsStore, FetchOutcome};
