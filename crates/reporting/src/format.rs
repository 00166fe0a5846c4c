//! Display formatting for KPI values.
//!
//! "N/A" marks a metric whose denominator was zero. It must stay visually
//! distinct from a real `$0` or `0.0%`, so every formatter here renders
//! `Metric::NotAvailable` as the sentinel instead of a zero.

use crate::metrics::Metric;

/// Whole-dollar currency with thousands separators: `$12,346`.
pub fn currency(metric: impl Into<Metric>) -> String {
    match metric.into().value() {
        Some(v) => {
            let rounded = v.round() as i64;
            let sign = if rounded < 0 { "-" } else { "" };
            format!("{sign}${}", group_thousands(rounded.unsigned_abs()))
        }
        None => "N/A".into(),
    }
}

/// Currency with cents: `$25.25`.
pub fn currency_cents(metric: impl Into<Metric>) -> String {
    match metric.into().value() {
        Some(v) => {
            let total_cents = (v.abs() * 100.0).round() as u64;
            let sign = if v < 0.0 && total_cents > 0 { "-" } else { "" };
            format!(
                "{sign}${}.{:02}",
                group_thousands(total_cents / 100),
                total_cents % 100
            )
        }
        None => "N/A".into(),
    }
}

/// Plain count with thousands separators: `1,234`.
pub fn count(value: u64) -> String {
    group_thousands(value)
}

/// ROAS-style multiplier: `6.33x`.
pub fn multiplier(metric: impl Into<Metric>) -> String {
    match metric.into().value() {
        Some(v) => format!("{v:.2}x"),
        None => "N/A".into(),
    }
}

/// Share as a percentage with one decimal: `69.1%`.
pub fn percent(metric: impl Into<Metric>) -> String {
    match metric.into().value() {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "N/A".into(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
