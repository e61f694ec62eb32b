//! Duration literals.

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const YEAR: u64 = 365 * DAY;

/// Formats a duration as a `SurrealQL` duration literal.
///
/// Units are emitted largest first and zero units are skipped, so
/// `Duration::from_secs(90)` becomes `1m30s`. Sub-microsecond precision is
/// dropped.
///
/// ```rust
/// use std::time::Duration;
/// use oxide_surql_core::grammar::format_interval;
///
/// assert_eq!(format_interval(Duration::from_secs(90)), "1m30s");
/// assert_eq!(format_interval(Duration::ZERO), "0s");
/// ```
#[must_use]
pub fn format_interval(duration: Duration) -> String {
    let mut remaining = duration.as_secs();
    let mut formatted = String::new();

    for (size, unit) in [
        (YEAR, "y"),
        (WEEK, "w"),
        (DAY, "d"),
        (HOUR, "h"),
        (MINUTE, "m"),
        (1, "s"),
    ] {
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            formatted.push_str(&format!("{count}{unit}"));
        }
    }

    let micros = duration.subsec_micros();
    if micros > 0 {
        formatted.push_str(&format!("{micros}µs"));
    }

    if formatted.is_empty() {
        formatted.push_str("0s");
    }
    formatted
}
