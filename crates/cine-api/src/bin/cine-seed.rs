//! Applies migrations and loads the default catalog
//!
//! ```bash
//! cargo run -p cine-api --bin cine-seed
//! ```
//!
//! Safe to run repeatedly; existing providers, categories and movies are kept.

use anyhow::Context;
use cine_common::{try_init_tracing, AppConfig};
use cine_core::SnowflakeGenerator;
use cine_db::{create_pool, run_migrations, seed};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = AppConfig::from_env().context("loading configuration")?;

    let db_config = cine_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: 2,
        min_connections: 1,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .context("connecting to PostgreSQL")?;

    run_migrations(&pool).await.context("running migrations")?;

    let ids = SnowflakeGenerator::new(config.snowflake.worker_id);
    let report = seed(&pool, &ids).await.context("seeding catalog")?;

    info!(
        otts = report.otts,
        categories = report.categories,
        movies = report.movies,
        "Seed complete"
    );

    pool.close().await;
    Ok(())
}
