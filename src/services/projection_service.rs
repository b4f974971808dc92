use tracing::{info, warn};

use crate::config::AnalyticsConfig;
use crate::errors::AppError;
use crate::external::spend_source::{SpendDataSource, SpendFilters};
use crate::models::{
    PeriodType, ProjectionMetrics, ProjectionPoint, SpendProjection, TimeSeriesPoint,
    TrendDirection,
};
use crate::services::{periods, statistics};

// Fixed blend of the three models. A business heuristic, not a learned
// ensemble; changing these changes dashboard output.
const LINEAR_WEIGHT: f64 = 0.40;
const SMOOTHED_WEIGHT: f64 = 0.35;
const MA_WEIGHT: f64 = 0.25;

// 95% band multiplier; the band widens 10% per projected step.
const Z_95: f64 = 1.96;
const MARGIN_GROWTH_PER_STEP: f64 = 0.10;

// Relative change across the last two points beyond which the short-term
// trend stops reading as stable.
const TREND_THRESHOLD: f64 = 0.05;

/// Fetch the spend series for `filters` and project `periods_to_project`
/// future periods.
pub async fn generate_projections(
    source: &dyn SpendDataSource,
    period: PeriodType,
    periods_to_project: usize,
    filters: &SpendFilters,
    config: &AnalyticsConfig,
) -> Result<SpendProjection, AppError> {
    if periods_to_project == 0 {
        return Err(AppError::Validation(
            "periods_to_project must be positive".to_string(),
        ));
    }

    let horizon = if periods_to_project > config.max_horizon {
        warn!(
            "clamping projection horizon {} to {}",
            periods_to_project, config.max_horizon
        );
        config.max_horizon
    } else {
        periods_to_project
    };

    let rows = source.spend_by_period(period, filters).await?;
    let historical: Vec<TimeSeriesPoint> = rows
        .into_iter()
        .map(|r| TimeSeriesPoint {
            period: r.period,
            value: r.total,
        })
        .collect();

    info!(
        "projecting {} {} period(s) from {} historical point(s)",
        horizon,
        period.to_string(),
        historical.len()
    );

    project(period, &historical, horizon, config)
}

/// Project `horizon` future periods from the historical series.
///
/// Pure and deterministic: identical inputs produce identical output. An
/// empty series yields the defined degenerate result (stable trend, zero
/// growth and confidence), never an error. Division hazards are guarded to
/// zero so no NaN or infinity reaches the output.
pub fn project(
    period: PeriodType,
    historical: &[TimeSeriesPoint],
    horizon: usize,
    config: &AnalyticsConfig,
) -> Result<SpendProjection, AppError> {
    if historical.is_empty() {
        return Ok(SpendProjection {
            historical: Vec::new(),
            projections: Vec::new(),
            metrics: ProjectionMetrics {
                trend: TrendDirection::Stable,
                growth_rate: 0.0,
                confidence: 0.0,
                r_squared: 0.0,
            },
        });
    }

    let values: Vec<f64> = historical.iter().map(|p| p.value).collect();
    let n = values.len();

    let fit = statistics::linear_regression(&values);
    let smoothed = statistics::exponential_smoothing(&values, config.smoothing_alpha);
    let ma = statistics::moving_average(&values, config.trend_window.min(n));
    let std_dev = statistics::sample_std_dev(&values);

    let last_smoothed = smoothed[n - 1];
    let last_ma = ma[n - 1];
    // Historical quirk kept for output compatibility: the additive slope is
    // re-read as a per-step growth ratio against the moving average.
    let ma_growth = if last_ma == 0.0 { 0.0 } else { fit.slope / last_ma };

    let labels = periods::future_labels(period, &historical[n - 1].period, horizon)?;

    let mut projections = Vec::with_capacity(horizon);
    for (i, label) in labels.into_iter().enumerate() {
        let linear = fit.slope * (n + i) as f64 + fit.intercept;
        let smoothed_trend = last_smoothed + fit.slope * (i + 1) as f64;
        let ma_trend = last_ma * (1.0 + ma_growth).powi((i + 1) as i32);

        let blended =
            LINEAR_WEIGHT * linear + SMOOTHED_WEIGHT * smoothed_trend + MA_WEIGHT * ma_trend;

        let margin = std_dev * Z_95 * (1.0 + i as f64 * MARGIN_GROWTH_PER_STEP);
        let projected = blended.max(0.0);

        projections.push(ProjectionPoint {
            period: label,
            projected,
            lower_bound: (projected - margin).max(0.0),
            upper_bound: projected + margin,
        });
    }

    Ok(SpendProjection {
        historical: historical.to_vec(),
        projections,
        metrics: derive_metrics(&values, fit.r_squared),
    })
}

fn derive_metrics(values: &[f64], r_squared: f64) -> ProjectionMetrics {
    let n = values.len();

    let trend = if n < 2 {
        TrendDirection::Stable
    } else {
        let prev = values[n - 2];
        let last = values[n - 1];
        let recent_growth = if prev == 0.0 { 0.0 } else { (last - prev) / prev };

        if recent_growth > TREND_THRESHOLD {
            TrendDirection::Up
        } else if recent_growth < -TREND_THRESHOLD {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    };

    let growth_rate = if n < 2 || values[0] == 0.0 {
        0.0
    } else {
        (values[n - 1] - values[0]) / values[0] * 100.0
    };

    ProjectionMetrics {
        trend,
        growth_rate,
        confidence: (r_squared * 100.0).clamp(0.0, 100.0),
        r_squared,
    }
}
