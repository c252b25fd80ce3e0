// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Sheet contents as plain data
//!
//! Nothing in here touches the workbook. The writer walks these layouts and
//! only decides how each [`Cell`] is formatted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use hx_core::{Report, Total};
use hx_domain_types::DurationUnit;

pub const OVERVIEW_SHEET: &str = "Overview";
pub const FACTS_SHEET: &str = "Facts";
pub const BY_ACTIVITY_SHEET: &str = "By Activity";
pub const BY_CATEGORY_SHEET: &str = "By Category";
pub const BY_DAY_SHEET: &str = "By Day";
pub const BY_TAG_SHEET: &str = "By Tag";

/// Column of the duration in the facts sheet
pub const FACTS_DURATION_COLUMN: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Excel serial of a date and time
    DateTime(f64),
    /// Excel serial of a whole day
    Date(f64),
    /// Fraction of a day
    Time(f64),
    /// Duration already converted to the report unit
    Duration(f64),
    /// Fraction of the report total
    Share(f64),
    Formula { formula: String, cached: f64 },
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub column_widths: Vec<f64>,
    /// Bold row written after the data rows
    pub total: Option<Vec<Cell>>,
    pub autofilter: bool,
}

impl SheetLayout {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Every sheet of the workbook, in order
pub fn workbook_layout(report: &Report, unit: DurationUnit, summary: bool) -> Vec<SheetLayout> {
    let mut sheets = vec![overview_sheet(report, unit), facts_sheet(report, unit)];
    if summary {
        sheets.push(summary_sheet(report, BY_ACTIVITY_SHEET, &report.by_activity, unit));
        sheets.push(summary_sheet(report, BY_CATEGORY_SHEET, &report.by_category, unit));
        sheets.push(summary_sheet(report, BY_DAY_SHEET, &report.by_day, unit));
        if report.has_tags() {
            sheets.push(summary_sheet(report, BY_TAG_SHEET, &report.by_tag, unit));
        }
    }
    sheets
}

pub fn overview_sheet(report: &Report, unit: DurationUnit) -> SheetLayout {
    let rows = vec![
        vec![Cell::text("Range start"), Cell::Date(excel_date(report.range.start()))],
        vec![Cell::text("Range end"), Cell::Date(excel_date(report.range.end()))],
        vec![Cell::text("Day start"), Cell::text(report.day_start.to_string())],
        vec![Cell::text("Generated at"), Cell::DateTime(excel_serial(report.generated_at))],
        vec![Cell::text("Facts"), Cell::Number(report.rows.len() as f64)],
        vec![
            Cell::text(format!("Total ({})", unit.suffix())),
            Cell::Duration(unit.from_minutes(report.total_minutes)),
        ],
    ];

    SheetLayout {
        name: OVERVIEW_SHEET.to_string(),
        headers: vec!["Item".to_string(), "Value".to_string()],
        rows,
        column_widths: vec![16.0, 20.0],
        total: None,
        autofilter: false,
    }
}

pub fn facts_sheet(report: &Report, unit: DurationUnit) -> SheetLayout {
    let rows: Vec<Vec<Cell>> = report
        .rows
        .iter()
        .map(|row| {
            let fact = &row.fact;
            vec![
                Cell::Date(excel_date(row.day)),
                Cell::Time(excel_time(fact.start.time())),
                fact.end.map_or(Cell::Empty, |end| Cell::Time(excel_time(end.time()))),
                Cell::Duration(unit.from_minutes(row.minutes)),
                Cell::text(&fact.activity),
                Cell::text(&fact.category),
                fact.description.as_ref().map_or(Cell::Empty, Cell::text),
                if fact.tags.is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(fact.tags.join(", "))
                },
            ]
        })
        .collect();

    let total_value = unit.from_minutes(report.total_minutes);
    let total_duration = if rows.is_empty() {
        Cell::Duration(total_value)
    } else {
        // Header is row 1, data starts on row 2
        let column = column_letter(FACTS_DURATION_COLUMN);
        Cell::Formula {
            formula: format!("=SUM({column}2:{column}{})", rows.len() + 1),
            cached: total_value,
        }
    };
    let mut total = vec![Cell::text("Total"), Cell::Empty, Cell::Empty, total_duration];
    total.extend(std::iter::repeat(Cell::Empty).take(4));

    SheetLayout {
        name: FACTS_SHEET.to_string(),
        headers: vec![
            "Date".to_string(),
            "Start".to_string(),
            "End".to_string(),
            format!("Duration ({})", unit.suffix()),
            "Activity".to_string(),
            "Category".to_string(),
            "Description".to_string(),
            "Tags".to_string(),
        ],
        rows,
        column_widths: vec![12.0, 8.0, 8.0, 14.0, 24.0, 18.0, 40.0, 24.0],
        total: Some(total),
        autofilter: true,
    }
}

pub fn summary_sheet(
    report: &Report,
    title: &str,
    totals: &[Total],
    unit: DurationUnit,
) -> SheetLayout {
    let rows = totals
        .iter()
        .map(|total| {
            vec![
                Cell::text(&total.key),
                Cell::Number(total.facts as f64),
                Cell::Duration(unit.from_minutes(total.minutes)),
                Cell::Share(report.share(total.minutes)),
            ]
        })
        .collect();

    SheetLayout {
        name: title.to_string(),
        headers: vec![
            "Name".to_string(),
            "Facts".to_string(),
            format!("Duration ({})", unit.suffix()),
            "Share".to_string(),
        ],
        rows,
        column_widths: vec![30.0, 8.0, 14.0, 10.0],
        total: None,
        autofilter: false,
    }
}

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

/// Days since 1899-12-30 plus the fraction of the day
pub fn excel_serial(at: NaiveDateTime) -> f64 {
    (at - excel_epoch()).num_seconds() as f64 / 86_400.0
}

pub fn excel_date(day: NaiveDate) -> f64 {
    excel_serial(day.and_time(NaiveTime::MIN))
}

pub fn excel_time(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 86_400.0
}

/// Zero-based column index to spreadsheet letters (0 is A, 26 is AA)
pub fn column_letter(col: u16) -> String {
    let mut letters = Vec::new();
    let mut n = u32::from(col) + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
