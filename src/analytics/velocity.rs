//! # Velocity Estimator
//!
//! Approximates time spent in the current stage as the whole days between a
//! deal's creation and its last update. Stage transitions are not tracked, so
//! this is a dwell-time proxy rather than a true per-stage duration.

use std::collections::HashMap;

use crate::models::{Deal, Stage, StageVelocity, StageVelocityEntry};

use super::whole_days_between;

/// Whole days between creation and last update, never negative.
pub fn days_in_stage(deal: &Deal) -> i64 {
    whole_days_between(deal.created_date, deal.updated_date).max(0)
}

/// Average days per recognized stage, in pipeline order.
///
/// Stages with no deals are omitted. Unrecognized labels are not reported and
/// do not contribute to the overall average.
pub fn compute_stage_velocity(deals: &[Deal]) -> StageVelocity {
    let mut totals: HashMap<Stage, (i64, usize)> = HashMap::new();
    for deal in deals {
        if let Some(stage) = deal.parsed_stage() {
            let entry = totals.entry(stage).or_insert((0, 0));
            entry.0 += days_in_stage(deal);
            entry.1 += 1;
        }
    }

    let stages: Vec<StageVelocityEntry> = Stage::ORDERED
        .iter()
        .filter_map(|stage| {
            let (days, count) = totals.get(stage)?;
            Some(StageVelocityEntry {
                stage: *stage,
                avg_days: *days as f64 / *count as f64,
                deal_count: *count,
            })
        })
        .collect();

    let counted: usize = stages.iter().map(|s| s.deal_count).sum();
    let overall_avg_days = if counted == 0 {
        0.0
    } else {
        stages
            .iter()
            .map(|s| s.avg_days * s.deal_count as f64)
            .sum::<f64>()
            / counted as f64
    };

    StageVelocity {
        stages,
        overall_avg_days,
    }
}
