//! HTTP route modules for the pipeline analytics service.
//!
//! Each route fetches the full deal list once and hands it to a single
//! aggregator:
//! - `stats`: win rates, territories, stages, forecast, velocity
//! - `deals`: stalled-deal detection

pub mod deals;
pub mod stats;
