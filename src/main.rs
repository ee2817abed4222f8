//! # Pipeline Analytics Service
//!
//! Serves sales-pipeline analytics for the dashboard: win rates, territory
//! rollups, stage breakdowns, revenue forecast, deal velocity and stalled
//! deals.
//!
//! ## Architecture
//!
//! - Axum handles HTTP routing and request/response lifecycle
//! - SQLx reads the `deals` table from the application database
//! - The `analytics` module does all computation in memory, per request

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use pipeline_analytics::config::AppConfig;
use pipeline_analytics::create_app;
use pipeline_analytics::db::{PgDealSource, SharedDealSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pipeline_analytics=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting pipeline analytics service");

    let config = AppConfig::from_env()?;

    let app_db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    info!("Connected to application database");

    sqlx::migrate!("./migrations").run(&app_db).await?;
    info!("Application migrations complete");

    let source: SharedDealSource = Arc::new(PgDealSource::new(app_db));
    let app = create_app(source, config.analytics);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        "Listening on {} (stale threshold {} days)",
        config.bind_addr, config.analytics.stale_threshold_days
    );

    axum::serve(listener, app).await?;
    Ok(())
}
