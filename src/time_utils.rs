// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as fixed-width RFC3339 using a `Z` suffix.
///
/// Microsecond precision keeps every stored value the same length, so
/// lexical ordering in the document store matches chronological ordering.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a client-supplied date.
///
/// Accepts RFC3339, a naive ISO date-time (taken as UTC) or a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_flexible_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter storing `DateTime<Utc>` via [`format_utc_rfc3339`].
pub mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(500);

        assert_eq!(format_utc_rfc3339(whole), "2026-01-02T03:04:05.000000Z");
        assert_eq!(format_utc_rfc3339(fractional), "2026-01-02T03:04:05.500000Z");
        assert!(format_utc_rfc3339(whole) < format_utc_rfc3339(fractional));
    }

    #[test]
    fn test_parse_flexible_date() {
        let midnight = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(parse_flexible_date("2025-03-14"), Some(midnight));
        assert_eq!(parse_flexible_date("2025-03-14T00:00:00"), Some(midnight));
        assert_eq!(parse_flexible_date("2025-03-14T05:30:00+05:30"), Some(midnight));
        assert_eq!(parse_flexible_date("yesterday"), None);
    }
}
