// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z`
/// suffix, e.g. `2024-03-15T09:30:00.000Z`.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Identifier for locally created records: epoch milliseconds.
pub fn millis_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats() {
        let date = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-03-15T09:30:00.000Z");
        assert_eq!(millis_id(date), "1710495000000");
    }
}
