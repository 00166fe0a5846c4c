use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A numeric-like field as it arrives off the wire. Upstream exports are
/// inconsistent: the same column may hold a JSON number, a numeric string,
/// `null`, or be missing from the row entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawField(pub Option<serde_json::Value>);

impl RawField {
    /// Coerce to a non-negative integer. Anything that does not parse
    /// cleanly (wrong type, junk string, null, absent) is 0.
    pub fn as_count(&self) -> u64 {
        match &self.0 {
            Some(serde_json::Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(0),
            Some(serde_json::Value::String(s)) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| {
                        s.parse::<f64>()
                            .ok()
                            .filter(|f| f.is_finite())
                            .map(|f| f.max(0.0) as u64)
                    })
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Coerce to a non-negative float. Parse failures are 0.0.
    pub fn as_amount(&self) -> f64 {
        self.as_float().map_or(0.0, |f| f.max(0.0))
    }

    /// Coerce to revenue. Parse failure and absence are `Untracked`, never
    /// zero: a row with no revenue figure must not count as zero revenue.
    pub fn as_revenue(&self) -> Revenue {
        match self.as_float() {
            Some(v) => Revenue::Tracked(v),
            None => Revenue::Untracked,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match &self.0 {
            Some(serde_json::Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
            Some(serde_json::Value::String(s)) => {
                s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
            }
            _ => None,
        }
    }
}

/// One row of the unified ad dataset, exactly as fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub impressions: RawField,
    #[serde(default)]
    pub clicks: RawField,
    #[serde(default)]
    pub spend: RawField,
    #[serde(default)]
    pub conversions: RawField,
    #[serde(default)]
    pub revenue: RawField,
}

/// Revenue for a single row. `Tracked(0.0)` is a real zero and lowers ROAS;
/// `Untracked` excludes the row from revenue and tracked-spend sums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum Revenue {
    Tracked(f64),
    Untracked,
}

impl Revenue {
    pub fn is_tracked(&self) -> bool {
        matches!(self, Revenue::Tracked(_))
    }
}

/// A row after normalization. Same order and count as the raw input; a row
/// is never dropped, only repaired. `date` is `None` when the date string
/// could not be repaired into a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub platform: String,
    pub campaign_name: String,
    pub date: Option<NaiveDate>,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: Revenue,
}

/// An exact-match slice of the dataset. `None` fields match everything, so a
/// filter with only `platform` set selects a whole platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentFilter {
    pub name: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub campaign_name: Option<String>,
}

impl SegmentFilter {
    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.platform.as_ref().map_or(true, |p| *p == record.platform)
            && self
                .campaign_name
                .as_ref()
                .map_or(true, |c| *c == record.campaign_name)
    }
}

/// Row-level data quality observed during normalization. Non-fatal; the
/// dashboard renders with these rows excluded from day-level aggregates only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    pub records_total: usize,
    pub malformed_dates: usize,
}
