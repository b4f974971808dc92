use std::collections::{HashMap, HashSet};

use serde_json::json;
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::errors::AppError;
use crate::external::spend_source::{ProductQuantityRow, SpendDataSource};
use crate::models::{AlertSeverity, DemandSpikeAlert, DEMAND_SPIKE_ALERT_TYPE};

/// Pull current demand aggregates and return freshly-detected spikes.
/// Persisting the alerts is the caller's job.
pub async fn detect_anomalies(
    source: &dyn SpendDataSource,
    config: &AnalyticsConfig,
) -> Result<Vec<DemandSpikeAlert>, AppError> {
    let recent = source.recent_demand_totals(config.spike_recent_days).await?;
    let trailing = source
        .trailing_demand_averages(config.spike_trailing_days)
        .await?;
    let recently_alerted: HashSet<String> = source
        .recent_spike_alert_products(config.spike_dedup_days)
        .await?
        .into_iter()
        .collect();

    let alerts = detect_spikes(&recent, &trailing, &recently_alerted, config);

    info!(
        "demand spike scan: {} product(s) flagged from {} recent aggregate(s)",
        alerts.len(),
        recent.len()
    );

    Ok(alerts)
}

/// Compare recent demand against trailing averages and emit spike alerts.
///
/// A product must appear in both aggregates. The trailing average must clear
/// the minimum-volume floor before the ratio is even considered, and products
/// already holding a recent spike alert are suppressed so repeated detection
/// runs stay idempotent.
pub fn detect_spikes(
    recent: &[ProductQuantityRow],
    trailing: &[ProductQuantityRow],
    recently_alerted: &HashSet<String>,
    config: &AnalyticsConfig,
) -> Vec<DemandSpikeAlert> {
    let trailing_by_product: HashMap<&str, f64> = trailing
        .iter()
        .map(|r| (r.product_name.as_str(), r.quantity))
        .collect();

    let mut alerts = Vec::new();

    for row in recent {
        if recently_alerted.contains(&row.product_name) {
            continue;
        }

        let trailing_avg = match trailing_by_product.get(row.product_name.as_str()) {
            Some(&avg) => avg,
            None => continue,
        };

        if trailing_avg <= config.spike_min_volume {
            continue;
        }

        let threshold = config.spike_ratio * trailing_avg;
        if row.quantity <= threshold {
            continue;
        }

        let increase_pct = ((row.quantity / trailing_avg - 1.0) * 100.0).round();

        alerts.push(DemandSpikeAlert {
            product_name: row.product_name.clone(),
            alert_type: DEMAND_SPIKE_ALERT_TYPE.to_string(),
            severity: AlertSeverity::Warning,
            message: format!(
                "Demand for {} is up {:.0}% over its trailing average",
                row.product_name, increase_pct
            ),
            threshold,
            actual_value: row.quantity,
            metadata: json!({
                "recent_total": row.quantity,
                "trailing_average": trailing_avg,
                "recent_window_days": config.spike_recent_days,
                "trailing_window_days": config.spike_trailing_days,
            }),
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, quantity: f64) -> ProductQuantityRow {
        ProductQuantityRow {
            product_name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_spike_detected_above_ratio() {
        let config = AnalyticsConfig::default();
        let recent = vec![row("Melatonin 3mg", 20.0)];
        let trailing = vec![row("Melatonin 3mg", 10.0)];

        let alerts = detect_spikes(&recent, &trailing, &HashSet::new(), &config);

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.alert_type, "demand_spike");
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.threshold, 15.0);
        assert_eq!(alert.actual_value, 20.0);
        assert!(alert.message.contains("100%"));
    }

    #[test]
    fn test_ratio_at_threshold_does_not_fire() {
        let config = AnalyticsConfig::default();
        // Exactly 1.5x is not a spike; the comparison is strict.
        let recent = vec![row("Progesterone 100mg", 15.0)];
        let trailing = vec![row("Progesterone 100mg", 10.0)];

        let alerts = detect_spikes(&recent, &trailing, &HashSet::new(), &config);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_minimum_volume_guard() {
        let config = AnalyticsConfig::default();
        // Huge ratio, but the trailing average is at the floor: never flags.
        let recent = vec![row("Ketamine 10% cream", 500.0)];
        let trailing = vec![row("Ketamine 10% cream", 5.0)];

        let alerts = detect_spikes(&recent, &trailing, &HashSet::new(), &config);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_recent_alert_suppresses_retrigger() {
        let config = AnalyticsConfig::default();
        let recent = vec![row("Melatonin 3mg", 40.0), row("LDN 4.5mg", 40.0)];
        let trailing = vec![row("Melatonin 3mg", 10.0), row("LDN 4.5mg", 10.0)];
        let alerted: HashSet<String> = ["Melatonin 3mg".to_string()].into_iter().collect();

        let alerts = detect_spikes(&recent, &trailing, &alerted, &config);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].product_name, "LDN 4.5mg");
    }

    #[test]
    fn test_product_missing_from_trailing_is_ignored() {
        let config = AnalyticsConfig::default();
        let recent = vec![row("New product", 100.0)];

        let alerts = detect_spikes(&recent, &[], &HashSet::new(), &config);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_message_rounds_percentage() {
        let config = AnalyticsConfig::default();
        // 16/9.9 - 1 = 61.6...% -> rounds to 62%.
        let recent = vec![row("Naltrexone 1.5mg", 16.0)];
        let trailing = vec![row("Naltrexone 1.5mg", 9.9)];

        let alerts = detect_spikes(&recent, &trailing, &HashSet::new(), &config);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.contains("62%"));
    }

    #[test]
    fn test_metadata_carries_audit_values() {
        let config = AnalyticsConfig::default();
        let recent = vec![row("Melatonin 3mg", 20.0)];
        let trailing = vec![row("Melatonin 3mg", 10.0)];

        let alerts = detect_spikes(&recent, &trailing, &HashSet::new(), &config);
        let meta = &alerts[0].metadata;
        assert_eq!(meta["recent_total"], 20.0);
        assert_eq!(meta["trailing_average"], 10.0);
        assert_eq!(meta["recent_window_days"], 7);
        assert_eq!(meta["trailing_window_days"], 30);
    }
}
