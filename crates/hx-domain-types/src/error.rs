// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building date ranges and day boundaries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("invalid date '{0}': expected YYYY-MM-DD, today, yesterday or -Nd")]
    InvalidDate(String),

    #[error("invalid day start '{0}': expected HH:MM")]
    InvalidDayStart(String),

    #[error("a preset cannot be combined with --start/--end")]
    PresetConflict,

    #[error("date out of supported range")]
    OutOfRange,
}
