//! Deal retrieval for the analytics routes.
//!
//! The routes only need "give me every deal", so the store sits behind the
//! `DealSource` trait. Production uses `PgDealSource`; tests plug in an
//! in-memory source.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::RetrievalError;
use crate::models::Deal;

/// Type alias for the application database pool.
pub type AppDb = PgPool;

/// Shared handle to the deal source, stored as an Axum extension.
///
/// Usage in route handlers:
/// ```ignore
/// async fn my_handler(
///     Extension(source): Extension<SharedDealSource>,
/// ) -> Result<Json<WinRates>, ApiError> {
///     let deals = source.fetch_all().await?;
///     // ...
/// }
/// ```
pub type SharedDealSource = Arc<dyn DealSource>;

/// Supplies the full current deal list. No partial results and no retries.
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Deal>, RetrievalError>;
}

/// Reads deals from the `deals` table.
#[derive(Debug, Clone)]
pub struct PgDealSource {
    pool: AppDb,
}

impl PgDealSource {
    pub fn new(pool: AppDb) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DealSource for PgDealSource {
    async fn fetch_all(&self) -> Result<Vec<Deal>, RetrievalError> {
        let deals: Vec<Deal> = sqlx::query_as(
            r#"
            SELECT id, stage, value, probability, transportation_mode, sales_rep,
                   origin_city, created_date, updated_date, expected_close_date
            FROM deals
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} deals", deals.len());
        Ok(deals)
    }
}
