//! Apply pending database migrations and exit.
//!
//! Reads the same `VULNETIX_*` settings as the server; a database URL is
//! required.

use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use vulnetix_backend::ServerSettings;
use vulnetix_backend::outbound::persistence::run_pending_migrations;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
        .map_err(|err| eyre!("tracing init failed: {err}"))?;

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let url = settings
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("VULNETIX_DATABASE_URL must be set to run migrations"))?;

    let applied = run_pending_migrations(url).wrap_err("migration run failed")?;
    info!(count = applied.len(), "database is up to date");
    Ok(())
}
