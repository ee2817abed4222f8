//! Deal-level routes.
//!
//! GET /api/deals/at-risk?threshold_days=N - Open deals idle for N+ days, stalest first

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::{info, warn};

use crate::analytics;
use crate::config::AnalyticsConfig;
use crate::db::SharedDealSource;
use crate::error::ApiError;
use crate::models::AtRiskQuery;

/// Build the deals router.
pub fn router() -> Router {
    Router::new().route("/api/deals/at-risk", get(at_risk_deals))
}

/// List stalled open deals. Without `threshold_days` the configured default applies.
async fn at_risk_deals(
    Extension(source): Extension<SharedDealSource>,
    Extension(config): Extension<AnalyticsConfig>,
    Query(query): Query<AtRiskQuery>,
) -> Result<Response, ApiError> {
    let threshold_days = query.threshold_days.unwrap_or(config.stale_threshold_days);
    if threshold_days < 0 {
        warn!("Rejected negative threshold_days={}", threshold_days);
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "threshold_days must not be negative" })),
        )
            .into_response());
    }

    let deals = source.fetch_all().await?;
    let now = chrono::Utc::now().naive_utc();
    let at_risk = analytics::find_at_risk_deals(&deals, now, threshold_days);

    info!(
        "{} of {} deals idle for {}+ days",
        at_risk.len(),
        deals.len(),
        threshold_days
    );
    Ok(Json(at_risk).into_response())
}
