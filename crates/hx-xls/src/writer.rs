// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Render sheet layouts into an `.xlsx` workbook

use hx_core::Report;
use hx_domain_types::DurationUnit;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, XlsError};
use crate::layout::{self, Cell, SheetLayout};

const HEADER_FILL: u32 = 0x4472C4;
const HEADER_FONT: u32 = 0xFFFFFF;
const TOTAL_FILL: u32 = 0xE2EFDA;

/// Writes a [`Report`] as a workbook
#[derive(Debug, Clone, Copy)]
pub struct WorkbookWriter {
    unit: DurationUnit,
    summary: bool,
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new(DurationUnit::default())
    }
}

impl WorkbookWriter {
    pub fn new(unit: DurationUnit) -> Self {
        Self {
            unit,
            summary: true,
        }
    }

    /// Include the per-activity, category, day and tag sheets
    pub fn summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    pub fn unit(&self) -> DurationUnit {
        self.unit
    }

    pub fn to_bytes(&self, report: &Report) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let formats = Formats::new(self.unit);

        for sheet in layout::workbook_layout(report, self.unit, self.summary) {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, &sheet, &formats)?;
            debug!(sheet = %sheet.name, rows = sheet.rows.len(), "rendered sheet");
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Render and write to `path`, replacing any existing file
    pub fn save(&self, report: &Report, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(report)?;
        std::fs::write(path, &bytes).map_err(|source| XlsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote workbook");
        Ok(())
    }
}

struct Formats {
    header: Format,
    text: Format,
    number: Format,
    date: Format,
    time: Format,
    datetime: Format,
    duration: Format,
    share: Format,
    total: Format,
    total_duration: Format,
}

impl Formats {
    fn new(unit: DurationUnit) -> Self {
        let duration_format = match unit {
            DurationUnit::Hours => "0.00",
            DurationUnit::Minutes => "0",
        };
        let cell = || Format::new().set_border(FormatBorder::Thin);

        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(HEADER_FILL)
                .set_font_color(HEADER_FONT)
                .set_border(FormatBorder::Thin),
            text: cell(),
            number: cell().set_num_format("0"),
            date: cell().set_num_format("yyyy-mm-dd"),
            time: cell().set_num_format("hh:mm"),
            datetime: cell().set_num_format("yyyy-mm-dd hh:mm"),
            duration: cell().set_num_format(duration_format),
            share: cell().set_num_format("0.0%"),
            total: cell().set_bold().set_background_color(TOTAL_FILL),
            total_duration: cell()
                .set_bold()
                .set_background_color(TOTAL_FILL)
                .set_num_format(duration_format),
        }
    }

    fn for_cell(&self, cell: &Cell) -> &Format {
        match cell {
            Cell::Text(_) | Cell::Empty => &self.text,
            Cell::Number(_) => &self.number,
            Cell::DateTime(_) => &self.datetime,
            Cell::Date(_) => &self.date,
            Cell::Time(_) => &self.time,
            Cell::Duration(_) | Cell::Formula { .. } => &self.duration,
            Cell::Share(_) => &self.share,
        }
    }

    fn for_total(&self, cell: &Cell) -> &Format {
        match cell {
            Cell::Duration(_) | Cell::Formula { .. } => &self.total_duration,
            _ => &self.total,
        }
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetLayout, formats: &Formats) -> Result<()> {
    worksheet.set_name(&sheet.name)?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &formats.header)?;
    }
    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let mut row_index: u32 = 1;
    for row in &sheet.rows {
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_index, col as u16, cell, formats.for_cell(cell))?;
        }
        row_index += 1;
    }

    if sheet.autofilter && !sheet.headers.is_empty() {
        let last_col = (sheet.column_count() - 1) as u16;
        worksheet.autofilter(0, 0, row_index - 1, last_col)?;
    }

    if let Some(total) = &sheet.total {
        for (col, cell) in total.iter().enumerate() {
            write_cell(worksheet, row_index, col as u16, cell, formats.for_total(cell))?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: &Format,
) -> Result<()> {
    match cell {
        Cell::Text(text) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        Cell::Number(value)
        | Cell::DateTime(value)
        | Cell::Date(value)
        | Cell::Time(value)
        | Cell::Duration(value)
        | Cell::Share(value) => {
            worksheet.write_number_with_format(row, col, *value, format)?;
        }
        Cell::Formula { formula, cached } => {
            let formula = Formula::new(formula).set_result(cached.to_string());
            worksheet.write_formula_with_format(row, col, formula, format)?;
        }
        Cell::Empty => {
            worksheet.write_blank(row, col, format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hx_core::FactFilter;
    use hx_domain_types::{DateRange, DayStart, Fact};

    fn report(with_facts: bool) -> Report {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let facts = if with_facts {
            vec![
                Fact::new(1, "coding", day.and_hms_opt(9, 0, 0).unwrap())
                    .with_category("Work")
                    .with_end(day.and_hms_opt(10, 0, 0).unwrap())
                    .with_tags(["billable"]),
            ]
        } else {
            Vec::new()
        };
        Report::build(
            DateRange::single(day),
            DayStart::default(),
            facts,
            &FactFilter::default(),
            day.and_hms_opt(18, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_to_bytes_produces_zip_container() {
        let bytes = WorkbookWriter::new(DurationUnit::Hours).to_bytes(&report(true)).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_empty_report_still_renders() {
        let bytes = WorkbookWriter::default().summary(false).to_bytes(&report(false)).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_builder_options() {
        let writer = WorkbookWriter::new(DurationUnit::Minutes).summary(false);
        assert_eq!(writer.unit(), DurationUnit::Minutes);
        assert!(!writer.summary);
        assert!(WorkbookWriter::default().summary);
    }
}
