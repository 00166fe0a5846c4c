//! Derived KPI ratios over rollups.

use serde::{Deserialize, Serialize};

use crate::aggregate::Rollup;

/// A derived ratio. A degenerate denominator (zero conversions, clicks,
/// tracked spend, or total spend) yields `NotAvailable`, which renders as
/// "N/A" downstream, never as infinity, NaN, or a silent zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum Metric {
    Available(f64),
    NotAvailable,
}

impl Metric {
    /// `numerator / denominator`, guarding the degenerate denominator.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Metric::NotAvailable
        } else {
            Metric::Available(numerator / denominator)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Available(v) => Some(*v),
            Metric::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric::Available(value)
    }
}

/// The ratio set derived from a rollup. Pure function of its input; every
/// load recomputes these from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Cost per acquisition: spend / conversions.
    pub cpa: Metric,
    /// Cost per click: spend / clicks.
    pub cpc: Metric,
    /// Return on ad spend, over the revenue-tracked share of spend only.
    pub roas: Metric,
    /// Share of spend with no revenue tracking behind it.
    pub untracked_spend_share: Metric,
}

impl DerivedMetrics {
    pub fn for_rollup(rollup: &Rollup) -> Self {
        Self {
            cpa: Metric::ratio(rollup.spend, rollup.conversions as f64),
            cpc: Metric::ratio(rollup.spend, rollup.clicks as f64),
            roas: Metric::ratio(rollup.revenue, rollup.tracked_spend),
            untracked_spend_share: Metric::ratio(rollup.untracked_spend(), rollup.spend),
        }
    }
}
