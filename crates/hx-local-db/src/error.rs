// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("no Hamster database found; tried: {}", join_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("database file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("opening {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{path} is not a Hamster database: {reason}")]
    NotHamsterDatabase { path: PathBuf, reason: String },

    #[error("querying Hamster database: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("fact {fact_id} has an unreadable timestamp '{value}'")]
    BadTimestamp { fact_id: i64, value: String },
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no candidate locations)".to_string();
    }
    paths.iter().map(|p| Path::display(p).to_string()).collect::<Vec<_>>().join(", ")
}
