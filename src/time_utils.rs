// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for activity date handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a stored activity date into a UTC instant for ordering.
///
/// Accepts RFC3339 with an offset, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// timestamp (read as UTC), or a bare `YYYY-MM-DD` (midnight UTC).
/// Anything else, including the `"Unknown"` fallback, yields `None`.
pub fn parse_activity_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
