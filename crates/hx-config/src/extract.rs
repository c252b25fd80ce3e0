// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typed extraction from merged configuration

use serde::de::DeserializeOwned;
use serde_json::Value as J;

use crate::error::{ConfigError, Result};

/// Extract the whole configuration as a typed value
pub fn get<T: DeserializeOwned>(root: &J) -> Result<T> {
    serde_path_to_error::deserialize(root.clone()).map_err(|e| ConfigError::Extract(e.to_string()))
}

/// Extract the subsection at a dotted path
pub fn get_at<T: DeserializeOwned>(root: &J, dotted: &str) -> Result<T> {
    let mut cur = root;
    for p in dotted.split('.') {
        cur = cur
            .get(p)
            .ok_or_else(|| ConfigError::Extract(format!("missing path: {}", dotted)))?;
    }
    serde_path_to_error::deserialize(cur.clone())
        .map_err(|e| ConfigError::Extract(format!("at '{}': {}", dotted, e)))
}
