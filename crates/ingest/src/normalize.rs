//! Record normalization: date repair plus permissive numeric coercion.
//!
//! Normalization is total. Every raw row produces exactly one normalized
//! record in the same position; bad fields are repaired or zeroed, never
//! rejected. The only per-row failure that survives is an unrepairable
//! date, which leaves `date` unset and bumps the quality counter.

use adpulse_core::types::{DataQuality, NormalizedRecord, RawRecord};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Normalized records plus what was observed while producing them.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub records: Vec<NormalizedRecord>,
    pub quality: DataQuality,
}

/// Normalize a fetched batch. Output length and order match the input.
pub fn normalize(raw: Vec<RawRecord>) -> NormalizeOutcome {
    let records_total = raw.len();
    let mut malformed_dates = 0usize;

    let records: Vec<NormalizedRecord> = raw
        .into_iter()
        .map(|row| {
            let date = repair_date(&row.date);
            if date.is_none() {
                malformed_dates += 1;
                debug!(
                    date = %row.date,
                    platform = %row.platform,
                    campaign = %row.campaign_name,
                    "unrepairable date, row excluded from the daily series"
                );
            }
            NormalizedRecord {
                platform: row.platform,
                campaign_name: row.campaign_name,
                date,
                impressions: row.impressions.as_count(),
                clicks: row.clicks.as_count(),
                spend: row.spend.as_amount(),
                conversions: row.conversions.as_count(),
                revenue: row.revenue.as_revenue(),
            }
        })
        .collect();

    if malformed_dates > 0 {
        warn!(
            malformed_dates,
            records_total, "rows with unrepairable dates in this batch"
        );
    }

    NormalizeOutcome {
        records,
        quality: DataQuality {
            records_total,
            malformed_dates,
        },
    }
}

/// Repair a possibly corrupted date string and parse it as a calendar date.
///
/// Some exports carry a tag token spliced into the date with extra hyphens
/// (`2024-03-01-Gacrux-Light`). The first three hyphen-delimited segments
/// are always the real `YYYY-MM-DD`; everything after them is discarded.
/// Fewer than three segments means the date is beyond repair.
pub fn repair_date(raw: &str) -> Option<NaiveDate> {
    let mut segments = raw.splitn(4, '-');
    let year = segments.next()?;
    let month = segments.next()?;
    let day = segments.next()?;
    let rejoined = format!("{year}-{month}-{day}");
    NaiveDate::parse_from_str(&rejoined, "%Y-%m-%d").ok()
}
