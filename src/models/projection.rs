use serde::{Deserialize, Serialize};

/// Aggregation granularity of a spend series. Controls future period-label
/// generation only; the projection math itself is positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Week,
    Month,
    Year,
}

impl ToString for PeriodType {
    fn to_string(&self) -> String {
        match self {
            PeriodType::Week => "week".to_string(),
            PeriodType::Month => "month".to_string(),
            PeriodType::Year => "year".to_string(),
        }
    }
}

impl PeriodType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "week" => Some(PeriodType::Week),
            "month" => Some(PeriodType::Month),
            "year" => Some(PeriodType::Year),
            _ => None,
        }
    }
}

/// Single aggregated point of the historical spend series.
///
/// Period labels are `YYYY-WW`, `YYYY-MM`, or `YYYY` depending on
/// granularity; points arrive ordered ascending with no gap filling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: String,
    pub value: f64,
}

/// Single projected future point with its confidence band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub period: String,
    pub projected: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Short-term direction read off the last two historical points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Series-level metrics derived once per projection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionMetrics {
    pub trend: TrendDirection,
    /// First-to-last change over the historical series, in percent, signed.
    pub growth_rate: f64,
    /// R² of the positional regression scaled to [0, 100].
    pub confidence: f64,
    pub r_squared: f64,
}

/// Complete projection response: historical echo, future points, metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendProjection {
    pub historical: Vec<TimeSeriesPoint>,
    pub projections: Vec<ProjectionPoint>,
    pub metrics: ProjectionMetrics,
}
