// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Command-line front end of hamster-xls

pub mod export;
pub mod show_config;

use anyhow::{Context, Result};
use hx_config::paths;
use hx_core::{FactFilter, RangePreset};
use hx_domain_types::DurationUnit;
use hx_logging::{APP_NAME, CliLoggingArgs};
use serde_json::{Value, json};
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Debug, Clone, clap::Parser)]
#[command(
    name = "hamster-xls",
    about = "Export Hamster time tracking data to an .xlsx spreadsheet",
    version
)]
pub struct Cli {
    /// Workbook to write; defaults to hamster-<start>-<end>.xlsx
    #[arg(value_name = "OUTPUT", conflicts_with = "output")]
    pub output_arg: Option<PathBuf>,

    #[arg(short = 'o', long, value_name = "PATH", help = "Workbook to write")]
    pub output: Option<PathBuf>,

    /// First day: YYYY-MM-DD, today, yesterday or -Nd
    #[arg(short = 's', long, value_name = "DATE", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Last day, inclusive
    #[arg(short = 'e', long, value_name = "DATE", allow_hyphen_values = true)]
    pub end: Option<String>,

    #[arg(short = 'p', long, value_enum, help = "Named range instead of --start/--end")]
    pub preset: Option<RangePreset>,

    #[arg(short = 'd', long, value_name = "PATH", help = "Path to hamster.db")]
    pub database: Option<PathBuf>,

    #[arg(long, value_name = "HH:MM", help = "Time at which a day begins")]
    pub day_start: Option<String>,

    #[arg(short = 'c', long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    #[arg(short = 'a', long = "activity", value_name = "NAME")]
    pub activities: Vec<String>,

    #[arg(short = 't', long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,

    #[arg(long, value_name = "TEXT", help = "Only facts mentioning TEXT")]
    pub search: Option<String>,

    #[arg(long, value_enum, help = "Unit of duration cells")]
    pub unit: Option<DurationUnit>,

    #[arg(long, help = "Leave out the summary sheets")]
    pub no_summary: bool,

    #[arg(short = 'f', long, help = "Overwrite an existing workbook")]
    pub force: bool,

    #[arg(short = 'n', long, help = "Print a summary instead of writing a workbook")]
    pub dry_run: bool,

    #[arg(long, value_name = "PATH", help = "Additional configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the resolved configuration and where each value came from")]
    pub show_config: bool,

    #[command(flatten)]
    pub logging: CliLoggingArgs,
}

impl Cli {
    /// Output path from either the positional argument or `--output`
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output.as_ref().or(self.output_arg.as_ref())
    }

    pub fn filter(&self) -> FactFilter {
        FactFilter {
            categories: self.categories.clone(),
            activities: self.activities.clone(),
            tags: self.tags.clone(),
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
        }
    }

    /// Flags that override configuration, keyed by dotted config path
    pub fn config_overrides(&self) -> Vec<(&'static str, Value)> {
        let mut overrides = Vec::new();
        if let Some(database) = &self.database {
            overrides.push(("database", json!(database)));
        }
        if let Some(day_start) = &self.day_start {
            overrides.push(("day-start", json!(day_start)));
        }
        if let Some(unit) = self.unit {
            overrides.push(("unit", json!(unit)));
        }
        if self.no_summary {
            overrides.push(("summary", json!(false)));
        }
        if let Some(level) = self.logging.log_level {
            overrides.push(("logging.log-level", json!(level)));
        }
        if let Some(format) = self.logging.log_format {
            overrides.push(("logging.log-format", json!(format)));
        }
        overrides
    }

    pub fn run(self) -> Result<()> {
        let paths = paths::discover_paths(self.config.as_deref());
        let resolved = hx_config::load(&paths, &self.config_overrides())
            .context("failed to load configuration")?;
        let settings = resolved.settings().context("invalid configuration")?;

        self.logging.clone().with_config(&settings.logging).init(APP_NAME)?;
        tracing::debug!(?settings, "resolved configuration");

        let mut stdout = std::io::stdout().lock();
        if self.show_config {
            show_config::print(&resolved, &mut stdout)?;
            return Ok(());
        }

        let now = chrono::Local::now().naive_local();
        let outcome = export::run(&self, &settings, now)?;
        outcome.print(&mut stdout, settings.unit)?;
        Ok(())
    }
}
