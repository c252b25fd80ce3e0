// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;
use thiserror::Error;

use crate::Scope;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading and resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("parsing config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {scope:?} configuration:\n  - {message}")]
    Schema { scope: Scope, message: String },

    #[error("reading environment: {0}")]
    Env(#[from] config::ConfigError),

    #[error("configuration value {0}")]
    Extract(String),
}
