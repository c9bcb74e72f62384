//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use vulnetix_backend::domain::ports::{
    FixtureSessionVerifier, FixtureSpdxCommand, FixtureUsageLogQuery, SessionVerifier,
    SpdxCommand, UsageLogQuery,
};
use vulnetix_backend::domain::{SpdxDeletionService, UsageLogQueryService};
use vulnetix_backend::inbound::http::state::HttpState;
use vulnetix_backend::outbound::persistence::{
    DbPool, DieselSessionVerifier, DieselSpdxRepository, DieselUsageLogRepository,
};

use super::ServerConfig;

fn diesel_ports(
    pool: &DbPool,
) -> (
    Arc<dyn SessionVerifier>,
    Arc<dyn UsageLogQuery>,
    Arc<dyn SpdxCommand>,
) {
    (
        Arc::new(DieselSessionVerifier::new(pool.clone())),
        Arc::new(UsageLogQueryService::new(Arc::new(
            DieselUsageLogRepository::new(pool.clone()),
        ))),
        Arc::new(SpdxDeletionService::new(Arc::new(
            DieselSpdxRepository::new(pool.clone()),
        ))),
    )
}

fn fixture_ports() -> (
    Arc<dyn SessionVerifier>,
    Arc<dyn UsageLogQuery>,
    Arc<dyn SpdxCommand>,
) {
    (
        Arc::new(FixtureSessionVerifier::default()),
        Arc::new(FixtureUsageLogQuery),
        Arc::new(FixtureSpdxCommand),
    )
}

/// Build HTTP state, using Diesel adapters when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (sessions, usage_logs, spdx) = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => fixture_ports(),
    };
    web::Data::new(HttpState::new(sessions, usage_logs, spdx))
}
