// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Hamster stores local wall-clock timestamps as text

use chrono::{Datelike, NaiveDate, NaiveDateTime};

const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a stored timestamp
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Format a bound for comparison against stored text
///
/// Years outside 0..=9999 would not sort as text, so they are clamped.
pub fn to_sql(at: NaiveDateTime) -> String {
    let clamped = if at.year() > 9999 {
        NaiveDate::from_ymd_opt(9999, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap_or(at)
    } else if at.year() < 0 {
        NaiveDate::from_ymd_opt(0, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap_or(at)
    } else {
        at
    };
    clamped.format("%Y-%m-%d %H:%M:%S").to_string()
}
