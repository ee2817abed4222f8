//! Property tests for the analytics aggregators.
//!
//! Deals are generated from small vocabularies so groups collide often and
//! every stage, including unrecognized labels, shows up.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use pipeline_analytics::analytics::{
    compute_stage_analytics, compute_stage_velocity, compute_territory_analytics,
    compute_win_rates, find_at_risk_deals, forecast_revenue, territory_for,
    DEFAULT_STALE_THRESHOLD_DAYS,
};
use pipeline_analytics::models::Deal;

const STAGES: &[&str] = &[
    "prospect",
    "qualified",
    "proposal",
    "negotiation",
    "closed_won",
    "closed_lost",
    "on_hold",
];
const MODES: &[&str] = &["ocean", "trucking", "air", "Ocean"];
const REPS: &[&str] = &["Alice", "Bob", "Carol"];
const ORIGINS: &[&str] = &["Los Angeles, CA", "Chicago,IL", "Honolulu, HI", "Nowhere", ""];

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid base time")
}

fn deal_strategy() -> impl Strategy<Value = Deal> {
    (
        0..STAGES.len(),
        0..MODES.len(),
        0..REPS.len(),
        prop::option::of(0..ORIGINS.len()),
        0u32..100_000,
        0i32..=100,
        0i64..120,
        -5i64..90,
    )
        .prop_map(|(stage, mode, rep, origin, value, probability, created, idle)| {
            let created_date = base_time() + Duration::days(created);
            Deal {
                id: 0,
                stage: STAGES[stage].to_string(),
                value: f64::from(value),
                probability,
                transportation_mode: MODES[mode].to_string(),
                sales_rep: REPS[rep].to_string(),
                origin_city: origin.map(|i| ORIGINS[i].to_string()),
                created_date,
                updated_date: created_date + Duration::days(idle),
                expected_close_date: None,
            }
        })
}

fn deals_strategy() -> impl Strategy<Value = Vec<Deal>> {
    prop::collection::vec(deal_strategy(), 0..40).prop_map(|mut deals| {
        for (i, deal) in deals.iter_mut().enumerate() {
            deal.id = i as i32 + 1;
        }
        deals
    })
}

proptest! {
    /// wins + losses per mode equals the number of closed deals with that mode.
    #[test]
    fn win_loss_counts_match_closed_deals(deals in deals_strategy()) {
        let rates = compute_win_rates(&deals);

        for (mode, stat) in &rates.by_transportation_mode {
            let closed = deals
                .iter()
                .filter(|d| &d.transportation_mode == mode && d.is_terminal())
                .count();
            prop_assert_eq!((stat.wins + stat.losses) as usize, closed);
            prop_assert!((0.0..=1.0).contains(&stat.win_rate));
        }
        for stat in rates.by_sales_rep.values() {
            prop_assert!(stat.wins + stat.losses > 0);
            prop_assert!((0.0..=1.0).contains(&stat.win_rate));
        }
    }

    /// totalValue sums closed_won values; every rep in a territory is listed.
    #[test]
    fn territory_value_and_rep_presence(deals in deals_strategy()) {
        let analytics = compute_territory_analytics(&deals);

        for (territory, stat) in &analytics {
            let in_territory: Vec<&Deal> = deals
                .iter()
                .filter(|d| territory_for(d.origin_city.as_deref()) == *territory)
                .collect();
            let expected: f64 = in_territory
                .iter()
                .filter(|d| d.stage == "closed_won")
                .map(|d| d.value)
                .sum();

            prop_assert!((stat.total_value - expected).abs() < 1e-6);
            for deal in &in_territory {
                prop_assert!(stat.rep_breakdown.contains_key(&deal.sales_rep));
            }
        }
    }

    /// Reversing the input does not change any grouped totals.
    #[test]
    fn grouped_totals_ignore_order(deals in deals_strategy()) {
        let mut reversed = deals.clone();
        reversed.reverse();

        prop_assert_eq!(compute_win_rates(&deals), compute_win_rates(&reversed));

        let forward = compute_territory_analytics(&deals);
        let backward = compute_territory_analytics(&reversed);
        prop_assert_eq!(forward.len(), backward.len());
        for (territory, stat) in &forward {
            let other = &backward[territory];
            prop_assert_eq!((stat.wins, stat.losses), (other.wins, other.losses));
            prop_assert_eq!(&stat.rep_breakdown, &other.rep_breakdown);
            prop_assert!((stat.total_value - other.total_value).abs() < 1e-6);
        }

        let stages = compute_stage_analytics(&deals);
        let stages_rev = compute_stage_analytics(&reversed);
        for (stage, bucket) in &stages.stage_analytics {
            prop_assert_eq!(bucket.count, stages_rev.stage_analytics[stage].count);
        }
    }

    /// Every aggregator is deterministic: same input, byte-identical JSON.
    #[test]
    fn repeated_calls_serialize_identically(deals in deals_strategy()) {
        let as_of = base_time().date();
        let now = base_time() + Duration::days(200);

        let outputs = || {
            vec![
                serde_json::to_string(&compute_win_rates(&deals)).unwrap(),
                serde_json::to_string(&compute_territory_analytics(&deals)).unwrap(),
                serde_json::to_string(&compute_stage_analytics(&deals)).unwrap(),
                serde_json::to_string(&forecast_revenue(&deals, as_of)).unwrap(),
                serde_json::to_string(&compute_stage_velocity(&deals)).unwrap(),
                serde_json::to_string(&find_at_risk_deals(&deals, now, DEFAULT_STALE_THRESHOLD_DAYS)).unwrap(),
            ]
        };

        prop_assert_eq!(outputs(), outputs());
    }

    /// Stage buckets partition the input; forecast months cover every deal.
    #[test]
    fn stage_buckets_and_forecast_cover_all_deals(deals in deals_strategy()) {
        let stages = compute_stage_analytics(&deals);
        let bucketed: usize = stages.stage_analytics.values().map(|b| b.count).sum();
        prop_assert_eq!(bucketed, deals.len());
        prop_assert_eq!(stages.total_deals, deals.len());

        let forecast = forecast_revenue(&deals, base_time().date());
        let counted: usize = forecast.months.iter().map(|m| m.deal_count).sum();
        let month_sum: f64 = forecast.months.iter().map(|m| m.forecast).sum();
        prop_assert_eq!(forecast.months.len(), 3);
        prop_assert_eq!(counted, deals.len());
        prop_assert!((forecast.total - month_sum).abs() < 1e-6);
    }

    /// At-risk results are open, over threshold and sorted stalest first.
    #[test]
    fn at_risk_deals_are_open_stale_and_sorted(deals in deals_strategy(), threshold in 0i64..90) {
        let now = base_time() + Duration::days(150);
        let at_risk = find_at_risk_deals(&deals, now, threshold);

        for entry in &at_risk {
            prop_assert!(!entry.deal.is_terminal());
            prop_assert!(entry.days_since_update >= threshold);
        }
        for pair in at_risk.windows(2) {
            prop_assert!(pair[0].days_since_update >= pair[1].days_since_update);
        }
    }
}

#[test]
fn prospect_only_input_is_excluded_from_win_rates_but_bucketed_by_stage() {
    let deal = Deal {
        id: 1,
        stage: "prospect".to_string(),
        value: 10.0,
        probability: 20,
        transportation_mode: "ocean".to_string(),
        sales_rep: "Alice".to_string(),
        origin_city: Some("Los Angeles, CA".to_string()),
        created_date: base_time(),
        updated_date: base_time(),
        expected_close_date: None,
    };
    let deals = vec![deal];

    let rates = compute_win_rates(&deals);
    assert!(rates.by_transportation_mode.is_empty());
    assert!(rates.by_sales_rep.is_empty());

    let stages = compute_stage_analytics(&deals);
    assert_eq!(stages.stage_analytics["prospect"].count, 1);
    assert_eq!(stages.stage_analytics["prospect"].percentage, 100);
}
