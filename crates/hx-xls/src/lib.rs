// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Spreadsheet output for hamster-xls reports.
//!
//! [`layout`] decides what goes in each sheet; [`WorkbookWriter`] turns those
//! layouts into an Office Open XML workbook.

pub mod error;
pub mod layout;
pub mod writer;

pub use error::{Result, XlsError};
pub use layout::{Cell, SheetLayout};
pub use writer::WorkbookWriter;
