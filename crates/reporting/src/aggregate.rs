//! Aggregation: single-pass folds from normalized records into rollups.
//!
//! Every grouping is one linear pass with keyed accumulation into a
//! `BTreeMap`. Nothing here mutates shared state; a fresh load rebuilds
//! every rollup from scratch.

use std::collections::BTreeMap;

use adpulse_core::types::{NormalizedRecord, Revenue, SegmentFilter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sums over one slice of the dataset. Spend and engagement counters are
/// unconditional; `revenue` and `tracked_spend` accumulate only from rows
/// whose revenue is tracked, so `tracked_spend <= spend` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
    pub spend: f64,
    pub conversions: u64,
    pub clicks: u64,
    pub impressions: u64,
    pub revenue: f64,
    pub tracked_spend: f64,
}

impl Rollup {
    /// Fold one record into this rollup.
    pub fn absorb(&mut self, record: &NormalizedRecord) {
        self.spend += record.spend;
        self.conversions += record.conversions;
        self.clicks += record.clicks;
        self.impressions += record.impressions;
        if let Revenue::Tracked(value) = record.revenue {
            self.revenue += value;
            self.tracked_spend += record.spend;
        }
    }

    /// Spend with no revenue tracking behind it.
    pub fn untracked_spend(&self) -> f64 {
        self.spend - self.tracked_spend
    }
}

fn fold<'a>(records: impl Iterator<Item = &'a NormalizedRecord>) -> Rollup {
    let mut rollup = Rollup::default();
    for record in records {
        rollup.absorb(record);
    }
    rollup
}

/// Fold every record into one global rollup.
pub fn global_rollup(records: &[NormalizedRecord]) -> Rollup {
    fold(records.iter())
}

/// Fold the records that satisfy `predicate`. This is the generic slice
/// operation; callers can request any subset without the aggregator
/// knowing about specific platforms or campaigns.
pub fn rollup_where<F>(records: &[NormalizedRecord], predicate: F) -> Rollup
where
    F: Fn(&NormalizedRecord) -> bool,
{
    fold(records.iter().filter(|r| predicate(r)))
}

/// Fold one configured segment slice.
pub fn segment_rollup(records: &[NormalizedRecord], filter: &SegmentFilter) -> Rollup {
    rollup_where(records, |r| filter.matches(r))
}

/// Group by platform, exact string match, case-sensitive. BTreeMap keys keep
/// the chart legend order deterministic across loads.
pub fn platform_rollups(records: &[NormalizedRecord]) -> BTreeMap<String, Rollup> {
    let mut map: BTreeMap<String, Rollup> = BTreeMap::new();
    for record in records {
        map.entry(record.platform.clone())
            .or_default()
            .absorb(record);
    }
    map
}

/// Per-day spend and conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRollup {
    pub spend: f64,
    pub conversions: u64,
}

/// Group by calendar day. Rows whose date could not be repaired are skipped
/// here; normalization already counted them as a quality warning, and they
/// still participate in the global and platform rollups.
pub fn day_rollups(records: &[NormalizedRecord]) -> BTreeMap<NaiveDate, DayRollup> {
    let mut map: BTreeMap<NaiveDate, DayRollup> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date {
            let day = map.entry(date).or_default();
            day.spend += record.spend;
            day.conversions += record.conversions;
        }
    }
    map
}

/// The daily series as parallel vectors, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub dates: Vec<NaiveDate>,
    pub daily_spend: Vec<f64>,
    pub daily_conversions: Vec<u64>,
}

impl TimeSeries {
    pub fn from_days(days: &BTreeMap<NaiveDate, DayRollup>) -> Self {
        let mut series = TimeSeries {
            dates: Vec::with_capacity(days.len()),
            daily_spend: Vec::with_capacity(days.len()),
            daily_conversions: Vec::with_capacity(days.len()),
        };
        for (date, day) in days {
            series.dates.push(*date);
            series.daily_spend.push(day.spend);
            series.daily_conversions.push(day.conversions);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
