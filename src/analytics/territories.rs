//! # Territory Aggregator
//!
//! Rolls every deal up into its resolved territory. Unlike the win-rate
//! aggregator, open deals still initialize their territory and rep entries,
//! so a rep with only pipeline activity shows up with zero wins and losses.

use crate::models::{Deal, Stage, TerritoryAnalytics};

use super::territory::territory_for;
use super::win_rate;

/// Compute per-territory outcomes, closed-won value and rep breakdown.
pub fn compute_territory_analytics(deals: &[Deal]) -> TerritoryAnalytics {
    let mut territories = TerritoryAnalytics::new();

    for deal in deals {
        let territory = territory_for(deal.origin_city.as_deref());
        let stat = territories.entry(territory).or_default();
        let rep = stat.rep_breakdown.entry(deal.sales_rep.clone()).or_default();

        match deal.parsed_stage() {
            Some(Stage::ClosedWon) => {
                rep.wins += 1;
                stat.wins += 1;
                stat.total_value += deal.value;
            }
            Some(Stage::ClosedLost) => {
                rep.losses += 1;
                stat.losses += 1;
            }
            _ => {}
        }
    }

    for stat in territories.values_mut() {
        stat.win_rate = win_rate(stat.wins, stat.losses);
    }

    territories
}
