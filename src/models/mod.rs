mod alert;
mod projection;
mod reorder;

pub use alert::{AlertSeverity, DemandSpikeAlert, DEMAND_SPIKE_ALERT_TYPE};
pub use projection::{
    PeriodType, ProjectionMetrics, ProjectionPoint, SpendProjection, TimeSeriesPoint,
    TrendDirection,
};
pub use reorder::{ReorderRecommendation, ReorderUrgency};
