//! # Pipeline Analytics Library
//!
//! Exposes the analytics functions, the deal source abstraction and the Axum
//! router so integration tests can create an in-process server without a
//! database.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AnalyticsConfig;
use crate::db::SharedDealSource;

/// Build the Axum router with all route modules and middleware.
///
/// The caller supplies the deal source; this function does NOT connect to a
/// database or start a server.
pub fn create_app(source: SharedDealSource, config: AnalyticsConfig) -> Router {
    Router::new()
        .merge(routes::stats::router())
        .merge(routes::deals::router())
        .layer(Extension(source))
        .layer(Extension(config))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
