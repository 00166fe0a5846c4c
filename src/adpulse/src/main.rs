//! AdPulse: advertising-performance dashboard core.
//!
//! CLI entry point and presentation adapter. Fetches the unified dataset,
//! runs the normalize/aggregate/derive pipeline, and renders the resulting
//! snapshot as a text summary or JSON.

use adpulse_core::config::AppConfig;
use adpulse_ingest::{normalize, RecordSource};
use adpulse_reporting::{format, DashboardSnapshot};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adpulse")]
#[command(about = "Advertising performance dashboard: KPIs, platform rollups, daily series")]
#[command(version)]
struct Cli {
    /// Dataset location: file path or http(s) URL (overrides config)
    #[arg(long, env = "ADPULSE__DATA__LOCATION")]
    data: Option<String>,

    /// Fetch timeout in seconds (overrides config)
    #[arg(long, env = "ADPULSE__DATA__FETCH_TIMEOUT_SECS")]
    fetch_timeout_secs: Option<u64>,

    /// Emit the full snapshot as JSON instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the rendered snapshot.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adpulse=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(data) = cli.data {
        config.data.location = data;
    }
    if let Some(secs) = cli.fetch_timeout_secs {
        config.data.fetch_timeout_secs = secs;
    }

    info!(
        location = %config.data.location,
        segments = config.segments.len(),
        "Configuration loaded"
    );

    let source = RecordSource::from_location(&config.data.location, config.data.fetch_timeout_secs);
    let raw = source.fetch().await?;

    let outcome = normalize(raw);
    let snapshot = DashboardSnapshot::build(&outcome.records, &config.segments, outcome.quality);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_text(&snapshot));
    }

    Ok(())
}

/// Render the snapshot as a terminal summary. Unavailable ratios show as
/// "N/A", never as a zero that could be mistaken for a measurement.
fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    out.push_str("Overview\n");
    out.push_str(&format!(
        "  Spend            {}\n",
        format::currency(snapshot.totals.spend)
    ));
    out.push_str(&format!(
        "  Conversions      {}\n",
        format::count(snapshot.totals.conversions)
    ));
    out.push_str(&format!(
        "  CPA              {}\n",
        format::currency_cents(snapshot.kpis.cpa)
    ));
    out.push_str(&format!(
        "  Revenue          {}\n",
        format::currency(snapshot.totals.revenue)
    ));
    out.push_str(&format!(
        "  ROAS (tracked)   {}\n",
        format::multiplier(snapshot.kpis.roas)
    ));
    out.push_str(&format!(
        "  Untracked spend  {}\n",
        format::percent(snapshot.kpis.untracked_spend_share)
    ));

    if !snapshot.platforms.platforms.is_empty() {
        out.push_str("\nPlatforms\n");
        for (i, platform) in snapshot.platforms.platforms.iter().enumerate() {
            out.push_str(&format!(
                "  {:<12} spend {:>12}  conversions {:>8}  CPA {:>8}  CPC {:>7}\n",
                platform,
                format::currency(snapshot.platforms.spend[i]),
                format::count(snapshot.platforms.conversions[i]),
                format::currency_cents(snapshot.platforms.cpa[i]),
                format::currency_cents(snapshot.platforms.cpc[i]),
            ));
        }
    }

    let series = &snapshot.time_series;
    if let (Some(first), Some(last)) = (series.dates.first(), series.dates.last()) {
        out.push_str(&format!(
            "\nDaily series: {first} to {last} ({} days)\n",
            series.len()
        ));
    }

    if !snapshot.segments.is_empty() {
        out.push_str("\nSegments\n");
        for segment in &snapshot.segments {
            out.push_str(&format!(
                "  {:<24} spend {:>12}  CPA {:>8}  ROAS {:>7}\n",
                segment.filter.name,
                format::currency(segment.rollup.spend),
                format::currency_cents(segment.metrics.cpa),
                format::multiplier(segment.metrics.roas),
            ));
        }
    }

    if snapshot.quality.malformed_dates > 0 {
        out.push_str(&format!(
            "\nData quality: {} of {} rows had unrepairable dates (excluded from the daily series)\n",
            snapshot.quality.malformed_dates, snapshot.quality.records_total
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpulse_core::types::{DataQuality, NormalizedRecord, Revenue, SegmentFilter};

    fn make_record(platform: &str, spend: f64, revenue: Revenue) -> NormalizedRecord {
        NormalizedRecord {
            platform: platform.into(),
            campaign_name: "X".into(),
            date: None,
            impressions: 100,
            clicks: 10,
            spend,
            conversions: 2,
            revenue,
        }
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_text_marks_unavailable_ratios() {
        let records = vec![make_record("Facebook", 50.5, Revenue::Untracked)];
        let snapshot = DashboardSnapshot::build(
            &records,
            &[],
            DataQuality {
                records_total: 1,
                malformed_dates: 1,
            },
        );
        let text = render_text(&snapshot);

        assert!(text.contains("Spend            $51\n"));
        assert!(text.contains("CPA              $25.25"));
        // No tracked spend at all: ROAS must be the sentinel, not $0 or 0.00x.
        assert!(text.contains("ROAS (tracked)   N/A"));
        assert!(text.contains("Untracked spend  100.0%"));
        assert!(text.contains("1 of 1 rows had unrepairable dates"));
    }

    #[test]
    fn test_render_text_lists_configured_segments() {
        let records = vec![
            make_record("Facebook", 100.0, Revenue::Untracked),
            make_record("Google", 300.0, Revenue::Tracked(1800.0)),
        ];
        let segments = vec![SegmentFilter {
            name: "Google".into(),
            platform: Some("Google".into()),
            campaign_name: None,
        }];
        let snapshot = DashboardSnapshot::build(&records, &segments, DataQuality::default());
        let text = render_text(&snapshot);

        assert!(text.contains("Platforms"));
        assert!(text.contains("Segments"));
        assert!(text.contains("ROAS   6.00x"));
        // No rows carried a usable date, so there is no daily series line.
        assert!(!text.contains("Daily series"));
    }
}
