//! Domain models for the pipeline analytics service.
//!
//! `Deal` maps to the `deals` table and is the only input the analytics
//! functions consume. The remaining types are derived groupings and the
//! result shapes serialized by the HTTP layer.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Database Models (sqlx::FromRow)
// ============================================================================

/// One sales opportunity as stored in the application database.
///
/// `stage` is kept as free text so unrecognized values survive the round
/// trip from the store; use [`Deal::parsed_stage`] for the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Deal {
    pub id: i32,
    pub stage: String,
    pub value: f64,
    pub probability: i32,
    pub transportation_mode: String,
    pub sales_rep: String,
    pub origin_city: Option<String>,
    pub created_date: NaiveDateTime,
    pub updated_date: NaiveDateTime,
    pub expected_close_date: Option<NaiveDateTime>,
}

impl Deal {
    /// Recognized pipeline stage, or `None` for a label outside the vocabulary.
    pub fn parsed_stage(&self) -> Option<Stage> {
        Stage::parse(&self.stage)
    }

    /// True for `closed_won` and `closed_lost`. No other field participates.
    pub fn is_terminal(&self) -> bool {
        self.parsed_stage().is_some_and(Stage::is_terminal)
    }
}

// ============================================================================
// Derived Groupings
// ============================================================================

/// Pipeline stage vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prospect,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    /// Display order used by stage-ordered reports.
    pub const ORDERED: [Stage; 6] = [
        Stage::Prospect,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::ClosedWon,
        Stage::ClosedLost,
    ];

    /// Parse a stored stage label. Matching is exact: `"Closed_Won"` is not
    /// `closed_won`.
    pub fn parse(label: &str) -> Option<Stage> {
        match label {
            "prospect" => Some(Stage::Prospect),
            "qualified" => Some(Stage::Qualified),
            "proposal" => Some(Stage::Proposal),
            "negotiation" => Some(Stage::Negotiation),
            "closed_won" => Some(Stage::ClosedWon),
            "closed_lost" => Some(Stage::ClosedLost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Prospect => "prospect",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::ClosedWon => "closed_won",
            Stage::ClosedLost => "closed_lost",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse geographic grouping derived from a deal's origin state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Territory {
    Pacific,
    Mountain,
    Midwest,
    Northeast,
    Southeast,
    Southwest,
    Other,
}

impl Territory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Territory::Pacific => "Pacific",
            Territory::Mountain => "Mountain",
            Territory::Midwest => "Midwest",
            Territory::Northeast => "Northeast",
            Territory::Southeast => "Southeast",
            Territory::Southwest => "Southwest",
            Territory::Other => "Other",
        }
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Analytics Results
// ============================================================================

/// Win/loss tally for one grouping key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLossStat {
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

/// Win rates grouped by transportation mode and by sales rep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinRates {
    pub by_transportation_mode: BTreeMap<String, WinLossStat>,
    pub by_sales_rep: BTreeMap<String, WinLossStat>,
}

/// Per-rep outcome counts inside a territory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepRecord {
    pub wins: u32,
    pub losses: u32,
}

/// Rollup for one territory. `total_value` only counts `closed_won` deals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryStat {
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub total_value: f64,
    pub rep_breakdown: BTreeMap<String, RepRecord>,
}

pub type TerritoryAnalytics = BTreeMap<Territory, TerritoryStat>;

/// All deals sharing one literal stage label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageBucket {
    pub deals: Vec<Deal>,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageAnalytics {
    pub total_deals: usize,
    pub stage_analytics: BTreeMap<String, StageBucket>,
}

/// Weighted revenue projected for one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthForecast {
    pub month: String,
    pub forecast: f64,
    pub deal_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueForecast {
    pub months: Vec<MonthForecast>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageVelocityEntry {
    pub stage: Stage,
    pub avg_days: f64,
    pub deal_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageVelocity {
    pub stages: Vec<StageVelocityEntry>,
    pub overall_avg_days: f64,
}

/// Display tier for a stalled deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

/// An open deal whose last update is older than the staleness threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskDeal {
    #[serde(flatten)]
    pub deal: Deal,
    pub days_since_update: i64,
    pub severity: RiskSeverity,
}

// ============================================================================
// Request Models
// ============================================================================

/// Query string for the at-risk endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AtRiskQuery {
    pub threshold_days: Option<i64>,
}
