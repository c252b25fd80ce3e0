// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Locating hamster.db

use std::path::{Path, PathBuf};

use crate::error::{DbError, Result};

const DB_FILE: &str = "hamster.db";

/// Locations Hamster has kept its database in, newest release first
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(data) = dirs::data_dir() {
        candidates.push(data.join("hamster").join(DB_FILE));
        candidates.push(data.join("hamster-applet").join(DB_FILE));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".gnome2").join("hamster-applet").join(DB_FILE));
    }
    candidates
}

/// Pick the database to read
///
/// An explicit path must exist. Without one, the first existing default
/// candidate is used.
pub fn discover_database(explicit: Option<&Path>) -> Result<PathBuf> {
    discover_in(explicit, &default_candidates())
}

pub fn discover_in(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(DbError::MissingFile(path.to_path_buf()));
    }

    for candidate in candidates {
        tracing::debug!(candidate = %candidate.display(), "probing for hamster.db");
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    Err(DbError::NotFound {
        tried: candidates.to_vec(),
    })
}
