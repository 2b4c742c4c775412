// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};

/// Day format used for health entries.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar day as `YYYY-MM-DD`.
///
/// Entries are ordered by comparing these strings, so the format must stay
/// zero-padded and most-significant-first.
pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(ENTRY_DATE_FORMAT).to_string()
}

/// Today's date in the server's local time zone.
pub fn today() -> String {
    format_entry_date(Local::now().date_naive())
}

/// Current Unix timestamp in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Unix timestamp `hours` from `from`, or `None` if that falls outside
/// chrono's representable range.
pub fn hours_after(from: DateTime<Utc>, hours: i64) -> Option<i64> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| from.checked_add_signed(delta))
        .map(|at| at.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_entry_date(date), "2025-03-07");
    }

    #[test]
    fn test_entry_dates_sort_like_calendar_days() {
        let earlier = format_entry_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        let later = format_entry_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn test_hours_after() {
        let from = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(hours_after(from, 2), Some(1_700_000_000 + 2 * 3600));
        assert_eq!(hours_after(from, 10_000_000_000), None);
        assert_eq!(hours_after(from, i64::MAX), None);
    }

    #[test]
    fn test_today_is_parseable() {
        let today = today();
        assert!(NaiveDate::parse_from_str(&today, ENTRY_DATE_FORMAT).is_ok());
    }
}
