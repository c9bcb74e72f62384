//! Backend entry-point: loads settings, prepares the database pool, and serves
//! the usage log and SPDX endpoints.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use vulnetix_backend::ServerSettings;
use vulnetix_backend::inbound::http::health::HealthState;
use vulnetix_backend::outbound::persistence::{DbPool, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::other(format!("invalid bind address: {e}")))?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                migrate(pool_config.database_url().to_owned()).await?;
            }
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| io::Error::other(e.to_string()))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving fixture data"),
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics()?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!(%bind_addr, "server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}

async fn migrate(database_url: String) -> io::Result<()> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| io::Error::other(e.to_string()))?;
    Ok(())
}

#[cfg(feature = "metrics")]
fn make_metrics() -> io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("vulnetix")
        .endpoint("/metrics")
        .build()
        .map_err(|e| io::Error::other(format!("configure Prometheus metrics: {e}")))
}
