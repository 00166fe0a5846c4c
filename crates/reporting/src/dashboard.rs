//! Dashboard snapshot: the read-only interface handed to the presentation
//! layer. Rebuilt in full on every load; the presentation side can render
//! it but never mutate core state through it.

use adpulse_core::types::{DataQuality, NormalizedRecord, SegmentFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{self, Rollup, TimeSeries};
use crate::metrics::{DerivedMetrics, Metric};

/// Per-platform parallel arrays driving the spend/conversion and CPA/CPC
/// charts. Indexes line up across all five vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    pub platforms: Vec<String>,
    pub spend: Vec<f64>,
    pub conversions: Vec<u64>,
    pub cpa: Vec<Metric>,
    pub cpc: Vec<Metric>,
}

/// One configured segment slice with its rollup and derived ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub filter: SegmentFilter,
    pub rollup: Rollup,
    pub metrics: DerivedMetrics,
}

/// Everything the presentation layer needs for one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub totals: Rollup,
    pub kpis: DerivedMetrics,
    pub platforms: PlatformBreakdown,
    pub time_series: TimeSeries,
    pub segments: Vec<SegmentReport>,
    pub quality: DataQuality,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Assemble the full snapshot from normalized records plus the
    /// caller-configured segment slices.
    pub fn build(
        records: &[NormalizedRecord],
        segment_filters: &[SegmentFilter],
        quality: DataQuality,
    ) -> Self {
        let totals = aggregate::global_rollup(records);
        let kpis = DerivedMetrics::for_rollup(&totals);

        let by_platform = aggregate::platform_rollups(records);
        let mut platforms = PlatformBreakdown::default();
        for (platform, rollup) in &by_platform {
            let derived = DerivedMetrics::for_rollup(rollup);
            platforms.platforms.push(platform.clone());
            platforms.spend.push(rollup.spend);
            platforms.conversions.push(rollup.conversions);
            platforms.cpa.push(derived.cpa);
            platforms.cpc.push(derived.cpc);
        }

        let time_series = TimeSeries::from_days(&aggregate::day_rollups(records));

        let segments: Vec<SegmentReport> = segment_filters
            .iter()
            .map(|filter| {
                let rollup = aggregate::segment_rollup(records, filter);
                SegmentReport {
                    metrics: DerivedMetrics::for_rollup(&rollup),
                    rollup,
                    filter: filter.clone(),
                }
            })
            .collect();

        info!(
            records = records.len(),
            platforms = platforms.platforms.len(),
            days = time_series.len(),
            segments = segments.len(),
            "dashboard snapshot built"
        );

        Self {
            totals,
            kpis,
            platforms,
            time_series,
            segments,
            quality,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpulse_core::types::Revenue;
    use chrono::NaiveDate;

    fn make_record(
        platform: &str,
        campaign: &str,
        day: u32,
        spend: f64,
        revenue: Revenue,
    ) -> NormalizedRecord {
        NormalizedRecord {
            platform: platform.into(),
            campaign_name: campaign.into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day),
            impressions: 1000,
            clicks: 100,
            spend,
            conversions: 10,
            revenue,
        }
    }

    fn fixture() -> Vec<NormalizedRecord> {
        vec![
            make_record("Facebook", "Conversions_Retargeting", 5, 100.0, Revenue::Untracked),
            make_record("Facebook", "Video_Views_Campaign", 6, 200.0, Revenue::Untracked),
            make_record("Google", "Shopping_All_Products", 5, 300.0, Revenue::Tracked(1800.0)),
            make_record("TikTok", "Traffic_Campaign", 6, 400.0, Revenue::Untracked),
        ]
    }

    #[test]
    fn test_snapshot_totals_and_kpis() {
        let snapshot = DashboardSnapshot::build(&fixture(), &[], DataQuality::default());

        assert_eq!(snapshot.totals.spend, 1000.0);
        assert_eq!(snapshot.totals.conversions, 40);
        assert_eq!(snapshot.totals.revenue, 1800.0);
        assert_eq!(snapshot.totals.tracked_spend, 300.0);
        assert_eq!(snapshot.kpis.cpa, Metric::Available(25.0));
        assert_eq!(snapshot.kpis.roas, Metric::Available(6.0));
        assert_eq!(snapshot.kpis.untracked_spend_share, Metric::Available(0.7));
    }

    #[test]
    fn test_snapshot_platform_breakdown_is_parallel_and_ordered() {
        let snapshot = DashboardSnapshot::build(&fixture(), &[], DataQuality::default());
        let platforms = &snapshot.platforms;

        assert_eq!(platforms.platforms, ["Facebook", "Google", "TikTok"]);
        assert_eq!(platforms.spend, [300.0, 300.0, 400.0]);
        assert_eq!(platforms.conversions, [20, 10, 10]);
        assert_eq!(platforms.cpa.len(), 3);
        assert_eq!(platforms.cpc.len(), 3);
        assert_eq!(platforms.cpa[0], Metric::Available(15.0));
        assert_eq!(platforms.cpc[1], Metric::Available(3.0));
    }

    #[test]
    fn test_snapshot_time_series() {
        let snapshot = DashboardSnapshot::build(&fixture(), &[], DataQuality::default());
        let series = &snapshot.time_series;

        assert_eq!(series.dates.len(), 2);
        assert_eq!(series.daily_spend, [400.0, 600.0]);
        assert_eq!(series.daily_conversions, [20, 20]);
    }

    #[test]
    fn test_snapshot_segments_come_from_configuration() {
        let filters = vec![
            SegmentFilter {
                name: "Google shopping".into(),
                platform: Some("Google".into()),
                campaign_name: Some("Shopping_All_Products".into()),
            },
            SegmentFilter {
                name: "nonexistent".into(),
                platform: Some("LinkedIn".into()),
                campaign_name: None,
            },
        ];
        let snapshot = DashboardSnapshot::build(&fixture(), &filters, DataQuality::default());

        assert_eq!(snapshot.segments.len(), 2);
        let shopping = &snapshot.segments[0];
        assert_eq!(shopping.rollup.spend, 300.0);
        assert_eq!(shopping.metrics.roas, Metric::Available(6.0));

        // An empty slice degrades to sentinels, not zeros or a panic.
        let empty = &snapshot.segments[1];
        assert_eq!(empty.rollup.spend, 0.0);
        assert_eq!(empty.metrics.cpa, Metric::NotAvailable);
    }

    #[test]
    fn test_snapshot_is_reproducible() {
        let records = fixture();
        let first = DashboardSnapshot::build(&records, &[], DataQuality::default());
        let second = DashboardSnapshot::build(&records, &[], DataQuality::default());

        assert_eq!(first.totals, second.totals);
        assert_eq!(first.kpis, second.kpis);
        assert_eq!(first.platforms, second.platforms);
        assert_eq!(first.time_series, second.time_series);
        assert_eq!(first.segments, second.segments);
        assert_eq!(first.quality, second.quality);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = DashboardSnapshot::build(&fixture(), &[], DataQuality::default());
        let value = serde_json::to_value(&snapshot).expect("snapshot must serialize");
        assert_eq!(value["totals"]["spend"], 1000.0);
        assert_eq!(value["platforms"]["platforms"][1], "Google");
    }
}
