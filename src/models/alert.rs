use serde::{Deserialize, Serialize};

pub const DEMAND_SPIKE_ALERT_TYPE: &str = "demand_spike";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl ToString for AlertSeverity {
    fn to_string(&self) -> String {
        match self {
            AlertSeverity::Info => "info".to_string(),
            AlertSeverity::Warning => "warning".to_string(),
            AlertSeverity::Critical => "critical".to_string(),
        }
    }
}

/// A freshly-detected demand spike. Persisting it (and therefore the
/// dedup state for later runs) is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSpikeAlert {
    pub product_name: String,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
    /// Quantity the recent window had to exceed to trigger.
    pub threshold: f64,
    /// Quantity the recent window actually reached.
    pub actual_value: f64,
    pub metadata: serde_json::Value,
}
