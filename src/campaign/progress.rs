//! Display computations shared by the list and detail views.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Parse a decimal ETH string for display math. Unparseable input counts as 0.
pub fn parse_amount(amount: &str) -> f64 {
    amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Funding progress in percent, capped at 100.
///
/// A non-positive target yields 0 rather than a division by zero.
pub fn progress_percentage(amount_collected: &str, target_amount: &str) -> f64 {
    let collected = parse_amount(amount_collected);
    let target = parse_amount(target_amount);
    if target <= 0.0 {
        return 0.0;
    }
    ((collected / target) * 100.0).clamp(0.0, 100.0)
}

/// Whole days until `deadline`, rounded up, never negative.
pub fn days_left(deadline: i64, now: i64) -> i64 {
    let remaining = deadline - now;
    if remaining <= 0 {
        return 0;
    }
    (remaining + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// "October 17, 2026 at 03:04 PM" (UTC).
pub fn format_date_long(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%B %-d, %Y at %I:%M %p").to_string())
        .unwrap_or_default()
}

/// "Oct 17, 2026" (UTC).
pub fn format_date_short(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Shorten an address to `0x1234...abcd`.
pub fn format_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Sum of decimal ETH strings, formatted with one decimal.
pub fn total_raised<'a>(amounts: impl IntoIterator<Item = &'a str>) -> String {
    let total: f64 = amounts.into_iter().map(parse_amount).sum();
    format!("{:.1}", total)
}
