// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar windows.

use chrono::{DateTime, Datelike, Duration, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Midnight UTC on the Monday of the ISO week containing `now`.
pub fn start_of_iso_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_since_monday);
    Utc.from_utc_datetime(&monday.and_time(NaiveTime::MIN))
}

/// Midnight UTC on the first day of the month containing `now`.
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    // Day 1 exists in every month
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_format_utc_rfc3339_uses_z_suffix() {
        assert_eq!(
            format_utc_rfc3339(utc("2024-01-17T15:30:00.123+02:00")),
            "2024-01-17T13:30:00Z"
        );
    }

    #[test]
    fn test_start_of_iso_week() {
        // 2024-01-17 is a Wednesday
        assert_eq!(
            start_of_iso_week(utc("2024-01-17T15:30:00Z")),
            utc("2024-01-15T00:00:00Z")
        );
        // Monday maps to itself, Sunday to the previous Monday
        assert_eq!(
            start_of_iso_week(utc("2024-01-15T00:00:00Z")),
            utc("2024-01-15T00:00:00Z")
        );
        assert_eq!(
            start_of_iso_week(utc("2024-01-21T23:59:59Z")),
            utc("2024-01-15T00:00:00Z")
        );
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(
            start_of_month(utc("2024-02-29T12:00:00Z")),
            utc("2024-02-01T00:00:00Z")
        );
        assert_eq!(
            start_of_month(utc("2024-03-01T00:00:00Z")),
            utc("2024-03-01T00:00:00Z")
        );
    }
}
