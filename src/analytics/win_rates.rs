//! # Win-Rate Aggregator
//!
//! Groups closed deals by transportation mode and by sales rep. Open and
//! unrecognized stages never reach a bucket, so every emitted bucket has at
//! least one win or loss.

use std::collections::BTreeMap;

use crate::models::{Deal, Stage, WinLossStat, WinRates};

use super::win_rate;

/// Compute win/loss counts and win rates per transportation mode and per rep.
///
/// Grouping keys are the literal field values; `"Ocean"` and `"ocean"` are
/// separate buckets.
pub fn compute_win_rates(deals: &[Deal]) -> WinRates {
    let mut by_mode: BTreeMap<String, WinLossStat> = BTreeMap::new();
    let mut by_rep: BTreeMap<String, WinLossStat> = BTreeMap::new();

    for deal in deals {
        let won = match deal.parsed_stage() {
            Some(Stage::ClosedWon) => true,
            Some(Stage::ClosedLost) => false,
            _ => continue,
        };

        for stat in [
            by_mode.entry(deal.transportation_mode.clone()).or_default(),
            by_rep.entry(deal.sales_rep.clone()).or_default(),
        ] {
            if won {
                stat.wins += 1;
            } else {
                stat.losses += 1;
            }
        }
    }

    for stat in by_mode.values_mut().chain(by_rep.values_mut()) {
        stat.win_rate = win_rate(stat.wins, stat.losses);
    }

    WinRates {
        by_transportation_mode: by_mode,
        by_sales_rep: by_rep,
    }
}
