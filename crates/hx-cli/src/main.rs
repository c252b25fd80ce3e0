// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use hamster_xls::{Cli, Parser};

fn main() -> Result<()> {
    Cli::parse().run()
}
