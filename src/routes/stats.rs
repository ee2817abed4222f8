//! Pipeline statistics routes.
//!
//! GET /api/stats/win-rates   - Win rates by transportation mode and sales rep
//! GET /api/stats/territories - Per-territory outcomes, closed-won value, rep breakdown
//! GET /api/stats/stages      - Deal counts and shares per stage
//! GET /api/stats/forecast    - Weighted revenue for the next three months
//! GET /api/stats/velocity    - Average days per stage

use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::info;

use crate::analytics;
use crate::db::SharedDealSource;
use crate::error::ApiError;
use crate::models::{RevenueForecast, StageAnalytics, StageVelocity, TerritoryAnalytics, WinRates};

/// Build the stats router.
pub fn router() -> Router {
    Router::new()
        .route("/api/stats/win-rates", get(win_rates))
        .route("/api/stats/territories", get(territories))
        .route("/api/stats/stages", get(stages))
        .route("/api/stats/forecast", get(forecast))
        .route("/api/stats/velocity", get(velocity))
}

async fn win_rates(
    Extension(source): Extension<SharedDealSource>,
) -> Result<Json<WinRates>, ApiError> {
    let deals = source.fetch_all().await?;
    let rates = analytics::compute_win_rates(&deals);

    info!(
        "Win rates over {} deals: {} modes, {} reps",
        deals.len(),
        rates.by_transportation_mode.len(),
        rates.by_sales_rep.len()
    );
    Ok(Json(rates))
}

async fn territories(
    Extension(source): Extension<SharedDealSource>,
) -> Result<Json<TerritoryAnalytics>, ApiError> {
    let deals = source.fetch_all().await?;
    let territories = analytics::compute_territory_analytics(&deals);

    info!("Territory analytics over {} deals: {} territories", deals.len(), territories.len());
    Ok(Json(territories))
}

async fn stages(
    Extension(source): Extension<SharedDealSource>,
) -> Result<Json<StageAnalytics>, ApiError> {
    let deals = source.fetch_all().await?;
    let stages = analytics::compute_stage_analytics(&deals);

    info!("Stage analytics over {} deals: {} stages", stages.total_deals, stages.stage_analytics.len());
    Ok(Json(stages))
}

async fn forecast(
    Extension(source): Extension<SharedDealSource>,
) -> Result<Json<RevenueForecast>, ApiError> {
    let deals = source.fetch_all().await?;
    let today = chrono::Utc::now().date_naive();

    Ok(Json(analytics::forecast_revenue(&deals, today)))
}

async fn velocity(
    Extension(source): Extension<SharedDealSource>,
) -> Result<Json<StageVelocity>, ApiError> {
    let deals = source.fetch_all().await?;

    Ok(Json(analytics::compute_stage_velocity(&deals)))
}
