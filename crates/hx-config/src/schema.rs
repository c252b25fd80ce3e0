// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typed shape of the whole configuration
//!
//! `Settings` is both the schema each layer is validated against and the
//! value the merged layers are extracted into.

use hx_domain_types::{DayStart, DurationUnit};
use hx_logging::LoggingConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Settings {
    /// Path to hamster.db; discovered when unset
    pub database: Option<PathBuf>,

    /// Wall-clock time a logical day begins, `HH:MM`
    #[schemars(with = "String")]
    pub day_start: DayStart,

    /// Directory for generated workbooks when no output path is given
    pub output_dir: Option<PathBuf>,

    /// Unit of duration cells
    pub unit: DurationUnit,

    /// Whether to add the per-activity, category, day and tag sheets
    pub summary: bool,

    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: None,
            day_start: DayStart::default(),
            output_dir: None,
            unit: DurationUnit::Hours,
            summary: true,
            logging: LoggingConfig::default(),
        }
    }
}
