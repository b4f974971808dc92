use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderUrgency {
    Low,
    Medium,
    High,
}

impl ToString for ReorderUrgency {
    fn to_string(&self) -> String {
        match self {
            ReorderUrgency::Low => "low".to_string(),
            ReorderUrgency::Medium => "medium".to_string(),
            ReorderUrgency::High => "high".to_string(),
        }
    }
}

/// Reorder timing estimate for one product, recomputed from current
/// aggregates on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub product_name: String,
    pub avg_daily_demand: f64,
    /// The assumed refill cycle the estimate is built on, in days.
    pub days_supply_pattern: i64,
    pub last_order_date: NaiveDate,
    /// Never earlier than the evaluation date.
    pub estimated_reorder_date: NaiveDate,
    pub urgency: ReorderUrgency,
}
