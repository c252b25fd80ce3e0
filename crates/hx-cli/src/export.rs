// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The export command: range, database, report, workbook

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use hx_config::Settings;
use hx_core::{Report, resolve_range};
use hx_domain_types::{DateRange, DurationUnit};
use hx_local_db::{HamsterDb, discover_database};
use hx_xls::WorkbookWriter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::Cli;

/// What an export run produced
#[derive(Debug)]
pub enum Outcome {
    Written { path: PathBuf, report: Report },
    DryRun { report: Report },
}

impl Outcome {
    pub fn report(&self) -> &Report {
        match self {
            Outcome::Written { report, .. } | Outcome::DryRun { report } => report,
        }
    }

    /// Result line, or the plain-text summary for a dry run
    pub fn print<W: Write>(&self, out: &mut W, unit: DurationUnit) -> std::io::Result<()> {
        match self {
            Outcome::Written { path, report } => writeln!(
                out,
                "Wrote {} ({} facts, {})",
                path.display(),
                report.rows.len(),
                format_duration(report.total_minutes, unit)
            ),
            Outcome::DryRun { report } => write_summary(out, report, unit),
        }
    }
}

/// `hamster-<start>-<end>.xlsx`, or `hamster-<day>.xlsx` for a single day
pub fn default_file_name(range: &DateRange) -> String {
    if range.start() == range.end() {
        format!("hamster-{}.xlsx", range.start())
    } else {
        format!("hamster-{}-{}.xlsx", range.start(), range.end())
    }
}

pub fn output_path(explicit: Option<&Path>, output_dir: Option<&Path>, range: &DateRange) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => output_dir
            .unwrap_or_else(|| Path::new("."))
            .join(default_file_name(range)),
    }
}

/// Run one export; `now` is the local wall-clock time
pub fn run(cli: &Cli, settings: &Settings, now: NaiveDateTime) -> Result<Outcome> {
    let range = resolve_range(cli.start.as_deref(), cli.end.as_deref(), cli.preset, now.date())
        .context("invalid date range")?;

    let output = (!cli.dry_run).then(|| {
        output_path(
            cli.output_path().map(PathBuf::as_path),
            settings.output_dir.as_deref(),
            &range,
        )
    });
    if let Some(path) = &output {
        if path.exists() && !cli.force {
            bail!("{} already exists, use --force to overwrite it", path.display());
        }
    }

    let db_path = discover_database(settings.database.as_deref())?;
    let db = HamsterDb::open(&db_path)
        .with_context(|| format!("cannot read {}", db_path.display()))?;
    info!(database = %db_path.display(), %range, day_start = %settings.day_start, "exporting");

    let facts = db.facts_in(&range.window(settings.day_start))?;
    let report = Report::build(range, settings.day_start, facts, &cli.filter(), now);
    if report.is_empty() {
        warn!(%range, "no facts found for the selected range and filters");
    }

    let Some(path) = output else {
        return Ok(Outcome::DryRun { report });
    };

    WorkbookWriter::new(settings.unit)
        .summary(settings.summary)
        .save(&report, &path)?;

    Ok(Outcome::Written { path, report })
}

fn format_duration(minutes: f64, unit: DurationUnit) -> String {
    match unit {
        DurationUnit::Hours => format!("{:.2} {}", unit.from_minutes(minutes), unit.suffix()),
        DurationUnit::Minutes => format!("{:.0} {}", minutes, unit.suffix()),
    }
}

fn write_summary<W: Write>(out: &mut W, report: &Report, unit: DurationUnit) -> std::io::Result<()> {
    writeln!(out, "Range: {} (day starts {})", report.range, report.day_start)?;
    writeln!(out, "Facts: {}", report.rows.len())?;
    writeln!(out, "Total: {}", format_duration(report.total_minutes, unit))?;

    for (title, totals) in [
        ("By category", &report.by_category),
        ("By activity", &report.by_activity),
        ("By tag", &report.by_tag),
    ] {
        if totals.is_empty() {
            continue;
        }
        writeln!(out, "{title}:")?;
        for total in totals {
            writeln!(out, "  {:<30} {:>10}", total.key, format_duration(total.minutes, unit))?;
        }
    }
    Ok(())
}
