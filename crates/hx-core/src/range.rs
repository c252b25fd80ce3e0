// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Turning command-line date tokens into a [`DateRange`]

use chrono::{Datelike, Days, NaiveDate};
use hx_domain_types::{DateRange, RangeError};
use serde::{Deserialize, Serialize};

/// Named ranges relative to today; the current period runs up to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePreset {
    Today,
    Yesterday,
    /// Monday of this week up to today
    ThisWeek,
    /// Monday to Sunday of the previous week
    LastWeek,
    /// First of this month up to today
    ThisMonth,
    /// The whole previous month
    LastMonth,
    /// January 1st up to today
    ThisYear,
}

impl RangePreset {
    pub fn resolve(self, today: NaiveDate) -> Result<DateRange, RangeError> {
        match self {
            RangePreset::Today => Ok(DateRange::single(today)),
            RangePreset::Yesterday => Ok(DateRange::single(days_before(today, 1)?)),
            RangePreset::ThisWeek => DateRange::new(monday_of(today)?, today),
            RangePreset::LastWeek => {
                let monday = days_before(monday_of(today)?, 7)?;
                DateRange::new(monday, days_after(monday, 6)?)
            }
            RangePreset::ThisMonth => DateRange::new(first_of_month(today)?, today),
            RangePreset::LastMonth => {
                let end = days_before(first_of_month(today)?, 1)?;
                DateRange::new(first_of_month(end)?, end)
            }
            RangePreset::ThisYear => {
                let start =
                    NaiveDate::from_ymd_opt(today.year(), 1, 1).ok_or(RangeError::OutOfRange)?;
                DateRange::new(start, today)
            }
        }
    }
}

/// Parse one date token
///
/// Accepts `YYYY-MM-DD`, `today`, `yesterday` and `-Nd` (N days ago).
pub fn parse_date(token: &str, today: NaiveDate) -> Result<NaiveDate, RangeError> {
    let trimmed = token.trim();
    let lowered = trimmed.to_ascii_lowercase();
    match lowered.as_str() {
        "today" => return Ok(today),
        "yesterday" => return days_before(today, 1),
        _ => {}
    }

    if let Some(count) = lowered.strip_prefix('-').and_then(|rest| rest.strip_suffix('d')) {
        let count: u64 = count.parse().map_err(|_| RangeError::InvalidDate(token.to_string()))?;
        return days_before(today, count);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| RangeError::InvalidDate(token.to_string()))
}

/// Resolve `--start`, `--end` and `--preset` into a range
///
/// - nothing given: today
/// - only a start: start up to today, or just the start when it lies in the future
/// - only an end: that single day
/// - a preset cannot be mixed with explicit dates
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    preset: Option<RangePreset>,
    today: NaiveDate,
) -> Result<DateRange, RangeError> {
    if let Some(preset) = preset {
        if start.is_some() || end.is_some() {
            return Err(RangeError::PresetConflict);
        }
        return preset.resolve(today);
    }

    let start = start.map(|s| parse_date(s, today)).transpose()?;
    let end = end.map(|e| parse_date(e, today)).transpose()?;

    match (start, end) {
        (None, None) => Ok(DateRange::single(today)),
        (Some(start), None) => DateRange::new(start, today.max(start)),
        (None, Some(end)) => Ok(DateRange::single(end)),
        (Some(start), Some(end)) => DateRange::new(start, end),
    }
}

fn days_before(day: NaiveDate, n: u64) -> Result<NaiveDate, RangeError> {
    day.checked_sub_days(Days::new(n)).ok_or(RangeError::OutOfRange)
}

fn days_after(day: NaiveDate, n: u64) -> Result<NaiveDate, RangeError> {
    day.checked_add_days(Days::new(n)).ok_or(RangeError::OutOfRange)
}

fn monday_of(day: NaiveDate) -> Result<NaiveDate, RangeError> {
    days_before(day, u64::from(day.weekday().num_days_from_monday()))
}

fn first_of_month(day: NaiveDate) -> Result<NaiveDate, RangeError> {
    day.with_day(1).ok_or(RangeError::OutOfRange)
}
