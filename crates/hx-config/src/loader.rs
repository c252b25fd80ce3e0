// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TOML loading and JSON validation functionality

use serde_json::Value as J;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ConfigError, Result};
use crate::Scope;

/// A configuration layer converted to JSON
#[derive(Debug, Clone)]
pub struct Layer {
    pub scope: Scope,
    pub json: J,
}

/// Parse TOML text into a JSON value
pub fn parse_toml_to_json(path: &Path, toml_str: &str) -> Result<J> {
    let value: toml::Value = toml::from_str(toml_str).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_value(value).map_err(|e| ConfigError::Extract(e.to_string()))
}

/// Validate a layer against the schema derived from `Settings`
pub fn validate_against_schema(v: &J, scope: Scope) -> Result<()> {
    use jsonschema::{Draft, JSONSchema};

    static SCHEMA: OnceLock<J> = OnceLock::new();
    let schema = SCHEMA.get_or_init(|| {
        let rs = schemars::schema_for!(crate::schema::Settings);
        serde_json::to_value(rs).unwrap_or(J::Bool(true))
    });

    static VALIDATOR: OnceLock<Option<JSONSchema>> = OnceLock::new();
    let validator = VALIDATOR.get_or_init(|| {
        JSONSchema::options().with_draft(Draft::Draft202012).compile(schema).ok()
    });

    let Some(validator) = validator else {
        tracing::warn!("configuration schema failed to compile, skipping validation");
        return Ok(());
    };

    if let Err(errors) = validator.validate(v) {
        let message = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("\n  - ");
        return Err(ConfigError::Schema { scope, message });
    }

    Ok(())
}

/// Load and validate a configuration layer from file
pub fn read_layer_from_file(path: &Path, scope: Scope) -> Result<Layer> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let json = parse_toml_to_json(path, &content)?;
    validate_against_schema(&json, scope)?;
    tracing::debug!(path = %path.display(), ?scope, "loaded config layer");

    Ok(Layer { scope, json })
}
