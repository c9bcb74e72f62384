//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureSessionVerifier, FixtureSpdxCommand, FixtureUsageLogQuery, SessionVerifier,
    SpdxCommand, UsageLogQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Resolves `X-Vulnetix` tokens into sessions.
    pub sessions: Arc<dyn SessionVerifier>,
    pub usage_logs: Arc<dyn UsageLogQuery>,
    pub spdx: Arc<dyn SpdxCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use vulnetix_backend::domain::ports::{
    ///     FixtureSessionVerifier, FixtureSpdxCommand, FixtureUsageLogQuery,
    /// };
    /// use vulnetix_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureSessionVerifier::default()),
    ///     Arc::new(FixtureUsageLogQuery),
    ///     Arc::new(FixtureSpdxCommand),
    /// );
    /// let _data = actix_web::web::Data::new(state);
    /// ```
    pub fn new(
        sessions: Arc<dyn SessionVerifier>,
        usage_logs: Arc<dyn UsageLogQuery>,
        spdx: Arc<dyn SpdxCommand>,
    ) -> Self {
        Self {
            sessions,
            usage_logs,
            spdx,
        }
    }
}

impl Default for HttpState {
    /// Fixture-backed state accepting [`FixtureSessionVerifier::TOKEN`].
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureSessionVerifier::default()),
            Arc::new(FixtureUsageLogQuery),
            Arc::new(FixtureSpdxCommand),
        )
    }
}
