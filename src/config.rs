use std::str::FromStr;

/// Tunable business constants for the analytics engines.
///
/// The projection blend weights, the 1.96 band multiplier, and the trend
/// thresholds define output behavior and live as constants next to the
/// projection math instead.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Exponential smoothing parameter.
    pub smoothing_alpha: f64,
    /// Moving-average window; capped at the series length at use sites.
    pub trend_window: usize,
    /// Upper bound on requested projection counts; larger requests are clamped.
    pub max_horizon: usize,
    /// Recent demand must exceed `spike_ratio * trailing_average` to flag a spike.
    pub spike_ratio: f64,
    /// Trailing average must exceed this before a spike can fire at all,
    /// so rarely-ordered products don't alert on noise.
    pub spike_min_volume: f64,
    /// Recent aggregation window, in days, requested from the data source.
    pub spike_recent_days: u32,
    /// Trailing aggregation window, in days.
    pub spike_trailing_days: u32,
    /// Suppress a new spike alert if one already exists within this many days.
    pub spike_dedup_days: u32,
    /// Assumed refill cycle for compound prescriptions, in days. A business
    /// assumption, not derived from data.
    pub supply_cycle_days: i64,
    /// Sampling window for reorder candidates, in days.
    pub demand_window_days: u32,
    /// Divisor turning the windowed average quantity into a daily demand rate.
    pub demand_avg_divisor_days: f64,
    /// Products with fewer orders than this in the window are excluded from
    /// reorder recommendations, not defaulted.
    pub min_order_count: i64,
    /// Days-until-reorder below this is High urgency (strict comparison).
    pub reorder_high_days: i64,
    /// Days-until-reorder below this is Medium urgency (strict comparison).
    pub reorder_medium_days: i64,
    /// Reorder result-set cap, applied after most-overdue-first ordering.
    pub max_reorder_results: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.3,
            trend_window: 4,
            max_horizon: 240,
            spike_ratio: 1.5,
            spike_min_volume: 5.0,
            spike_recent_days: 7,
            spike_trailing_days: 30,
            spike_dedup_days: 7,
            supply_cycle_days: 84,
            demand_window_days: 90,
            demand_avg_divisor_days: 30.0,
            min_order_count: 2,
            reorder_high_days: 7,
            reorder_medium_days: 21,
            max_reorder_results: 20,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            smoothing_alpha: env_parse("ANALYTICS_SMOOTHING_ALPHA", defaults.smoothing_alpha),
            trend_window: env_parse("ANALYTICS_TREND_WINDOW", defaults.trend_window),
            max_horizon: env_parse("ANALYTICS_MAX_HORIZON", defaults.max_horizon),
            spike_ratio: env_parse("ANALYTICS_SPIKE_RATIO", defaults.spike_ratio),
            spike_min_volume: env_parse("ANALYTICS_SPIKE_MIN_VOLUME", defaults.spike_min_volume),
            spike_recent_days: env_parse("ANALYTICS_SPIKE_RECENT_DAYS", defaults.spike_recent_days),
            spike_trailing_days: env_parse(
                "ANALYTICS_SPIKE_TRAILING_DAYS",
                defaults.spike_trailing_days,
            ),
            spike_dedup_days: env_parse("ANALYTICS_SPIKE_DEDUP_DAYS", defaults.spike_dedup_days),
            supply_cycle_days: env_parse("ANALYTICS_SUPPLY_CYCLE_DAYS", defaults.supply_cycle_days),
            demand_window_days: env_parse(
                "ANALYTICS_DEMAND_WINDOW_DAYS",
                defaults.demand_window_days,
            ),
            demand_avg_divisor_days: env_parse(
                "ANALYTICS_DEMAND_AVG_DIVISOR_DAYS",
                defaults.demand_avg_divisor_days,
            ),
            min_order_count: env_parse("ANALYTICS_MIN_ORDER_COUNT", defaults.min_order_count),
            reorder_high_days: env_parse("ANALYTICS_REORDER_HIGH_DAYS", defaults.reorder_high_days),
            reorder_medium_days: env_parse(
                "ANALYTICS_REORDER_MEDIUM_DAYS",
                defaults.reorder_medium_days,
            ),
            max_reorder_results: env_parse(
                "ANALYTICS_MAX_REORDER_RESULTS",
                defaults.max_reorder_results,
            ),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha < 1.0) {
            return Err("ANALYTICS_SMOOTHING_ALPHA must be in (0, 1)".to_string());
        }
        if self.spike_ratio <= 0.0 {
            return Err("ANALYTICS_SPIKE_RATIO must be positive".to_string());
        }
        if self.supply_cycle_days <= 0 {
            return Err("ANALYTICS_SUPPLY_CYCLE_DAYS must be positive".to_string());
        }
        if self.reorder_high_days > self.reorder_medium_days {
            return Err(
                "ANALYTICS_REORDER_HIGH_DAYS must not exceed ANALYTICS_REORDER_MEDIUM_DAYS"
                    .to_string(),
            );
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
