//! # Forecast Estimator
//!
//! Projects weighted revenue into the month of `as_of` and the two months
//! after it. Each deal contributes `value * probability/100 * stage weight`.
//!
//! Deals are spread across the three months by position in the input
//! (`index mod 3`), not by `expected_close_date`.
//!
//! TODO: bucket by `expected_close_date` once dashboard consumers sign off on
//! the changed month totals.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::{Deal, MonthForecast, RevenueForecast, Stage};

pub const FORECAST_MONTHS: usize = 3;

/// Weight applied to stage labels outside the known vocabulary.
pub const UNRECOGNIZED_STAGE_WEIGHT: f64 = 0.5;

/// Share of a deal's probability-adjusted value expected to land.
pub fn stage_weight(stage: Option<Stage>) -> f64 {
    match stage {
        Some(Stage::Prospect) => 0.1,
        Some(Stage::Qualified) => 0.3,
        Some(Stage::Proposal) => 0.5,
        Some(Stage::Negotiation) => 0.7,
        Some(Stage::ClosedWon) => 1.0,
        Some(Stage::ClosedLost) => 0.0,
        None => UNRECOGNIZED_STAGE_WEIGHT,
    }
}

/// Weighted contribution of a single deal.
pub fn weighted_value(deal: &Deal) -> f64 {
    deal.value * (f64::from(deal.probability) / 100.0) * stage_weight(deal.parsed_stage())
}

/// Forecast weighted revenue for the three calendar months starting at `as_of`.
pub fn forecast_revenue(deals: &[Deal], as_of: NaiveDate) -> RevenueForecast {
    let mut months: Vec<MonthForecast> = (0..FORECAST_MONTHS)
        .map(|offset| MonthForecast {
            month: month_label(as_of, offset),
            forecast: 0.0,
            deal_count: 0,
        })
        .collect();

    for (index, deal) in deals.iter().enumerate() {
        let bucket = &mut months[index % FORECAST_MONTHS];
        bucket.forecast += weighted_value(deal);
        bucket.deal_count += 1;
    }

    let total: f64 = months.iter().map(|m| m.forecast).sum();
    debug!("Forecast {} deals from {}: total {:.2}", deals.len(), as_of, total);

    RevenueForecast { months, total }
}

/// `YYYY-MM` label for the month `offset` months after `as_of`.
fn month_label(as_of: NaiveDate, offset: usize) -> String {
    let index = as_of.year() * 12 + as_of.month0() as i32 + offset as i32;
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}
