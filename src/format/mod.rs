//! Display formatting helpers
//!
//! German-locale rendering used by the presentation layer: currency with
//! comma decimals and dot grouping, whole-percent labels, timestamps, and
//! the one-line pledge summary for a cost item's charge groups. All
//! user-facing copy around these values belongs to the presentation layer.

use chrono::{DateTime, Utc};

use crate::allocation::ChargeGroup;

/// Format a whole-currency amount, e.g. `1.234,56 €` or `1.234,56 CHF`.
///
/// Euro amounts get the currency symbol, everything else the ISO code.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let grouped = group_thousands(cents / 100);
    let fraction = cents % 100;
    let unit = if currency == "EUR" { "€" } else { currency };
    format!("{sign}{grouped},{fraction:02} {unit}")
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// Whole-percent label for a ratio, e.g. `0.857` becomes `86 %`.
pub fn format_percent(ratio: f64) -> String {
    format!("{} %", (ratio * 100.0).round() as i64)
}

/// Timestamp in the `03.11.2025, 18:15` style the discussion thread uses.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d.%m.%Y, %H:%M").to_string()
}

/// One-line pledge summary for a cost item's charge groups, e.g.
/// `6× 60,00 € · 12× 30,00 €`. `None` when nothing was assigned.
pub fn charge_group_label(groups: &[ChargeGroup], currency: &str) -> Option<String> {
    if groups.is_empty() {
        return None;
    }
    let parts: Vec<String> = groups
        .iter()
        .map(|group| format!("{}× {}", group.count, format_currency(group.amount, currency)))
        .collect();
    Some(parts.join(" · "))
}
