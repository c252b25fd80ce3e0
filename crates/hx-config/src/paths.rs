// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration file path discovery

use std::path::{Path, PathBuf};

/// Variable overriding the directory holding `config.toml`
pub const HOME_ENV: &str = "HAMSTER_XLS_HOME";

const CONFIG_FILE: &str = "config.toml";

/// Configuration file paths for each file-backed scope
#[derive(Debug, Clone)]
pub struct Paths {
    /// Per-user file; skipped when it does not exist
    pub user: Option<PathBuf>,
    /// File passed with `--config`; must exist when set
    pub cli_config: Option<PathBuf>,
}

/// Discover configuration paths for the current environment
pub fn discover_paths(cli_config: Option<&Path>) -> Paths {
    let home = std::env::var_os(HOME_ENV).map(PathBuf::from);
    Paths {
        user: user_config_path(home.as_deref()),
        cli_config: cli_config.map(Path::to_path_buf),
    }
}

/// User configuration path
///
/// `HAMSTER_XLS_HOME/config.toml` when the override is set, otherwise
/// `<platform config dir>/hamster-xls/config.toml`.
pub fn user_config_path(home_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(home) = home_override {
        return Some(home.join(CONFIG_FILE));
    }
    dirs::config_dir().map(|dir| dir.join("hamster-xls").join(CONFIG_FILE))
}
