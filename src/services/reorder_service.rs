use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::errors::AppError;
use crate::external::spend_source::{ProductDemandSample, SpendDataSource};
use crate::models::{ReorderRecommendation, ReorderUrgency};

/// Pull current demand samples and return reorder recommendations,
/// most overdue first, capped at the configured result size.
pub async fn reorder_recommendations(
    source: &dyn SpendDataSource,
    config: &AnalyticsConfig,
) -> Result<Vec<ReorderRecommendation>, AppError> {
    let samples = source
        .product_demand_samples(config.demand_window_days)
        .await?;
    let today = Utc::now().date_naive();

    let mut recommendations = recommend_reorders(&samples, today, config);
    recommendations.truncate(config.max_reorder_results);

    info!(
        "reorder scan: {} recommendation(s) from {} sampled product(s)",
        recommendations.len(),
        samples.len()
    );

    Ok(recommendations)
}

/// Estimate reorder timing for each adequately-sampled product.
///
/// Products with fewer than `min_order_count` orders in the window are
/// excluded outright, not defaulted. The countdown assumes the fixed
/// supply-cycle length from config; the estimated date never lands in the
/// past even for long-overdue products.
pub fn recommend_reorders(
    samples: &[ProductDemandSample],
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> Vec<ReorderRecommendation> {
    let mut recommendations: Vec<ReorderRecommendation> = samples
        .iter()
        .filter(|s| s.order_count >= config.min_order_count)
        .map(|s| {
            let avg_daily_demand = (s.avg_quantity / config.demand_avg_divisor_days).max(0.0);
            let days_since_last_order = (today - s.last_order_date).num_days();
            let days_until_reorder = config.supply_cycle_days - days_since_last_order;

            let urgency = if days_until_reorder < config.reorder_high_days {
                ReorderUrgency::High
            } else if days_until_reorder < config.reorder_medium_days {
                ReorderUrgency::Medium
            } else {
                ReorderUrgency::Low
            };

            ReorderRecommendation {
                product_name: s.product_name.clone(),
                avg_daily_demand,
                days_supply_pattern: config.supply_cycle_days,
                last_order_date: s.last_order_date,
                estimated_reorder_date: today + Duration::days(days_until_reorder.max(0)),
                urgency,
            }
        })
        .collect();

    // Oldest last order first, i.e. most overdue at the top.
    recommendations.sort_by_key(|r| r.last_order_date);

    recommendations
}
