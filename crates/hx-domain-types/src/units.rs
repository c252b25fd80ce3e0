// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit used for duration cells in the exported workbook
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    /// Decimal hours
    #[default]
    Hours,
    /// Whole minutes
    Minutes,
}

impl DurationUnit {
    /// Convert a minute count into this unit
    pub fn from_minutes(&self, minutes: f64) -> f64 {
        match self {
            DurationUnit::Hours => minutes / 60.0,
            DurationUnit::Minutes => minutes,
        }
    }

    /// Short suffix used in column headers
    pub fn suffix(&self) -> &'static str {
        match self {
            DurationUnit::Hours => "h",
            DurationUnit::Minutes => "min",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationUnit::Hours => write!(f, "hours"),
            DurationUnit::Minutes => write!(f, "minutes"),
        }
    }
}
