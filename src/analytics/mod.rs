//! Pure analytics over a list of deals.
//!
//! Each module owns one aggregation and none of them call each other:
//! - `territory`: origin city → state → territory resolution
//! - `win_rates`: win/loss by transportation mode and sales rep
//! - `territories`: win/loss, closed-won value and rep breakdown per territory
//! - `stages`: deal counts and shares per stage label
//! - `forecast`: stage- and probability-weighted revenue over three months
//! - `velocity`: average days per stage
//! - `risk`: stalled open deals with a severity tier
//!
//! All functions are synchronous, allocate their own accumulators and never
//! mutate the input slice.

pub mod forecast;
pub mod risk;
pub mod stages;
pub mod territories;
pub mod territory;
pub mod velocity;
pub mod win_rates;

pub use forecast::forecast_revenue;
pub use risk::{find_at_risk_deals, DEFAULT_STALE_THRESHOLD_DAYS};
pub use stages::compute_stage_analytics;
pub use territories::compute_territory_analytics;
pub use territory::{extract_state, resolve_territory, territory_for};
pub use velocity::compute_stage_velocity;
pub use win_rates::compute_win_rates;

use chrono::NaiveDateTime;

const SECONDS_PER_DAY: i64 = 86_400;

/// `wins / (wins + losses)`, or 0 when nothing has closed.
pub(crate) fn win_rate(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total)
    }
}

/// Whole days from `from` to `to`, floored. Negative when `to` precedes `from`.
pub(crate) fn whole_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}
