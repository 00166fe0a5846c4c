//! Performance reporting: rollup aggregation, derived KPI ratios, display
//! formatting, and the dashboard snapshot handed to the presentation layer.

pub mod aggregate;
pub mod dashboard;
pub mod format;
pub mod metrics;

pub use aggregate::{
    day_rollups, global_rollup, platform_rollups, rollup_where, segment_rollup, DayRollup, Rollup,
    TimeSeries,
};
pub use dashboard::{DashboardSnapshot, PlatformBreakdown, SegmentReport};
pub use metrics::{DerivedMetrics, Metric};
