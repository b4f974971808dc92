use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::PeriodType;

/// One row of the per-period spend aggregation: total invoiced value and
/// invoice count under a period label.
#[derive(Debug, Clone)]
pub struct SpendPeriodRow {
    pub period: String,
    pub total: f64,
    pub invoice_count: i64,
}

/// Per-product quantity over an aggregation window. Used both for
/// recent-window sums and trailing-window averages.
#[derive(Debug, Clone)]
pub struct ProductQuantityRow {
    pub product_name: String,
    pub quantity: f64,
}

/// Per-product order aggregate feeding reorder estimation.
#[derive(Debug, Clone)]
pub struct ProductDemandSample {
    pub product_name: String,
    /// Distinct orders inside the sampling window.
    pub order_count: i64,
    /// Average quantity per window, not per day.
    pub avg_quantity: f64,
    pub last_order_date: NaiveDate,
}

/// Filters forwarded verbatim to the data source; the analytics core never
/// interprets them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpendFilters {
    pub pharmacy_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Error)]
pub enum SpendSourceError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// The persistence collaborator. Implementations own all I/O and hand the
/// core already-materialized, time-ordered aggregates.
#[async_trait]
pub trait SpendDataSource: Send + Sync {
    /// Spend totals aggregated at the requested granularity, ordered
    /// ascending by period label.
    async fn spend_by_period(
        &self,
        period: PeriodType,
        filters: &SpendFilters,
    ) -> Result<Vec<SpendPeriodRow>, SpendSourceError>;

    /// Per-product summed quantities over the last `days` days.
    async fn recent_demand_totals(
        &self,
        days: u32,
    ) -> Result<Vec<ProductQuantityRow>, SpendSourceError>;

    /// Per-product average window quantity over the trailing `days` days.
    async fn trailing_demand_averages(
        &self,
        days: u32,
    ) -> Result<Vec<ProductQuantityRow>, SpendSourceError>;

    /// Products that already carry a demand-spike alert raised within the
    /// last `days` days.
    async fn recent_spike_alert_products(&self, days: u32)
        -> Result<Vec<String>, SpendSourceError>;

    /// Per-product demand samples over the last `window_days` days.
    async fn product_demand_samples(
        &self,
        window_days: u32,
    ) -> Result<Vec<ProductDemandSample>, SpendSourceError>;
}
