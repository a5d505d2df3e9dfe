//! Migrate command - applies the accounts schema and exits

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{run_account_migrations, PostgresConfig};

/// Connect to the configured PostgreSQL database and apply pending migrations
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    let pool = PostgresConfig::from_settings(&config.storage)?.connect().await?;
    let applied = run_account_migrations(&pool).await?;

    info!(applied, "Migrations finished");
    pool.close().await;

    Ok(())
}
