// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Domain types for hamster-xls
//!
//! These types describe Hamster time-tracking records and the calendar
//! ranges they are exported over. They are shared by the database reader,
//! the report builder and the spreadsheet writer, and carry no I/O.

pub mod error;
pub mod fact;
pub mod range;
pub mod units;

pub use error::RangeError;
pub use fact::{Fact, UNKNOWN_ACTIVITY, UNSORTED_CATEGORY};
pub use range::{DateRange, DayStart, TimeWindow};
pub use units::DurationUnit;
