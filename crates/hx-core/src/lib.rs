// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Range resolution and report aggregation for hamster-xls.
//!
//! This crate sits between the database reader and the spreadsheet writer:
//! it decides which days are exported and turns raw facts into rows and
//! totals.

pub mod range;
pub mod report;

pub use range::{RangePreset, parse_date, resolve_range};
pub use report::{FactFilter, Report, ReportRow, Total};
