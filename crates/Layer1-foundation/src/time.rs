//! Time formatting utilities
//!
//! The remote service reports timestamps as unix seconds.

use chrono::{DateTime, Utc};

/// Format a unix timestamp as a calendar date (UTC).
///
/// Out-of-range timestamps render as "unknown" rather than panicking.
pub fn format_date(unix_secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(unix_secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

/// Format the elapsed time between two unix timestamps as `HH:MM:SS`.
///
/// Used for "time since last online" displays. Negative spans (clock skew,
/// timestamp in the future) clamp to zero.
pub fn format_elapsed(earlier_unix_secs: i64, now_unix_secs: i64) -> String {
    let elapsed = (now_unix_secs - earlier_unix_secs).max(0);

    let hours = elapsed / 3600;
    let minutes = (elapsed % 3600) / 60;
    let seconds = elapsed % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Current unix timestamp (seconds).
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        // 2021-01-01T00:00:00Z
        assert_eq!(format_date(1_609_459_200), "2021-01-01");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0, 0), "00:00:00");
        assert_eq!(format_elapsed(0, 61), "00:01:01");
        assert_eq!(format_elapsed(0, 3_661), "01:01:01");
        // Spans longer than a day keep counting hours
        assert_eq!(format_elapsed(0, 90_000), "25:00:00");
    }

    #[test]
    fn test_format_elapsed_clamps_negative() {
        assert_eq!(format_elapsed(100, 50), "00:00:00");
    }
}
