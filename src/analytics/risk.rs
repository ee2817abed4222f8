//! # Risk Detector
//!
//! Flags open deals that have not been updated for at least the staleness
//! threshold. Closed deals are never at risk, however old.

use chrono::NaiveDateTime;

use crate::models::{AtRiskDeal, Deal, RiskSeverity};

use super::whole_days_between;

/// Days without an update before an open deal is considered stalled.
pub const DEFAULT_STALE_THRESHOLD_DAYS: i64 = 21;

const HIGH_SEVERITY_DAYS: i64 = 60;
const MEDIUM_SEVERITY_DAYS: i64 = 40;

/// Display tier for a deal idle for `days`. Not part of the stalled filter.
pub fn severity_for(days: i64) -> RiskSeverity {
    if days >= HIGH_SEVERITY_DAYS {
        RiskSeverity::High
    } else if days >= MEDIUM_SEVERITY_DAYS {
        RiskSeverity::Medium
    } else {
        RiskSeverity::Low
    }
}

/// Open deals idle for at least `threshold_days`, stalest first.
///
/// Ties keep their input order.
pub fn find_at_risk_deals(
    deals: &[Deal],
    now: NaiveDateTime,
    threshold_days: i64,
) -> Vec<AtRiskDeal> {
    let mut at_risk: Vec<AtRiskDeal> = deals
        .iter()
        .filter(|deal| !deal.is_terminal())
        .filter_map(|deal| {
            let days = whole_days_between(deal.updated_date, now);
            (days >= threshold_days).then(|| AtRiskDeal {
                deal: deal.clone(),
                days_since_update: days,
                severity: severity_for(days),
            })
        })
        .collect();

    at_risk.sort_by(|a, b| b.days_since_update.cmp(&a.days_since_update));
    at_risk
}
