// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Calendar ranges and logical day boundaries

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RangeError;

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering exactly one day
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days in the range, counting both ends
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every day of the range in calendar order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.succ_opt().filter(|next| *next <= end)
        })
    }

    /// Half-open datetime window covering the range when days begin at `day_start`
    pub fn window(&self, day_start: DayStart) -> TimeWindow {
        let from = self.start.and_time(day_start.time());
        let to = self
            .end
            .succ_opt()
            .map(|next| next.and_time(day_start.time()))
            .unwrap_or(NaiveDateTime::MAX);
        TimeWindow { from, to }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

/// Half-open `[from, to)` interval of local wall-clock datetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl TimeWindow {
    /// Whether `[start, end)` intersects this window. An open `end` never finishes.
    pub fn overlaps(&self, start: NaiveDateTime, end: Option<NaiveDateTime>) -> bool {
        start < self.to && end.map_or(true, |end| end > self.from)
    }
}

/// Wall-clock time at which a logical day begins
///
/// Hamster users who work past midnight usually move the day boundary to
/// the early morning so late sessions count towards the previous day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayStart(NaiveTime);

impl DayStart {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Parse an `HH:MM` string
    pub fn parse(value: &str) -> Result<Self, RangeError> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| RangeError::InvalidDayStart(value.to_string()))
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Logical day a datetime belongs to
    pub fn day_of(&self, at: NaiveDateTime) -> NaiveDate {
        if at.time() < self.0 {
            at.date().pred_opt().unwrap_or(at.date())
        } else {
            at.date()
        }
    }

    /// Offset of the day start from midnight
    pub fn offset(&self) -> Duration {
        Duration::seconds(i64::from(self.0.num_seconds_from_midnight()))
    }
}

impl Default for DayStart {
    fn default() -> Self {
        Self(NaiveTime::MIN)
    }
}

impl fmt::Display for DayStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for DayStart {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayStart {
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayStart> for String {
    fn from(value: DayStart) -> Self {
        value.to_string()
    }
}
