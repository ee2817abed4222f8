//! # Stage Aggregator
//!
//! Partitions deals by their literal stage label. No filtering: unrecognized
//! labels get their own bucket.

use std::collections::BTreeMap;

use crate::models::{Deal, StageAnalytics, StageBucket};

/// Group deals by stage with counts and rounded percentage of all deals.
///
/// Percentages are rounded independently and may not sum to exactly 100.
pub fn compute_stage_analytics(deals: &[Deal]) -> StageAnalytics {
    let total_deals = deals.len();

    let mut groups: BTreeMap<String, Vec<Deal>> = BTreeMap::new();
    for deal in deals {
        groups.entry(deal.stage.clone()).or_default().push(deal.clone());
    }

    let stage_analytics = groups
        .into_iter()
        .map(|(stage, stage_deals)| {
            let count = stage_deals.len();
            let bucket = StageBucket {
                deals: stage_deals,
                count,
                percentage: percentage_of(count, total_deals),
            };
            (stage, bucket)
        })
        .collect();

    StageAnalytics {
        total_deals,
        stage_analytics,
    }
}

fn percentage_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
