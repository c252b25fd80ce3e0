// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration for hamster-xls
//!
//! Layers are converted to JSON, validated against the schema derived from
//! [`Settings`], and merged in precedence order:
//! defaults < user file < environment < `--config` file < flags.
//! Provenance records which layer set every key.

pub mod env;
pub mod error;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod provenance;
pub mod schema;

pub use error::{ConfigError, Result};
pub use provenance::{Provenance, Scope};
pub use schema::Settings;

use serde_json::Value as J;

/// Merged configuration with provenance information
#[derive(Debug)]
pub struct Resolved {
    pub json: J,
    pub provenance: Provenance,
}

impl Resolved {
    /// Extract the typed settings
    pub fn settings(&self) -> Result<Settings> {
        extract::get(&self.json)
    }
}

/// Load every layer, reading environment variables from the current process
pub fn load(paths: &paths::Paths, flags: &[(&str, J)]) -> Result<Resolved> {
    load_all(paths, env::env_overlay()?, env::flags_overlay(flags))
}

/// Merge all layers in precedence order
pub fn load_all(paths: &paths::Paths, env_layer: J, flags_layer: J) -> Result<Resolved> {
    let defaults = serde_json::to_value(Settings::default())
        .map_err(|e| ConfigError::Extract(e.to_string()))?;

    let user_layer = match &paths.user {
        Some(path) if path.exists() => Some(loader::read_layer_from_file(path, Scope::User)?),
        _ => None,
    };

    loader::validate_against_schema(&env_layer, Scope::Env)?;

    let cli_config_layer = match &paths.cli_config {
        Some(path) if path.exists() => {
            Some(loader::read_layer_from_file(path, Scope::CliConfig)?)
        }
        Some(path) => return Err(ConfigError::MissingFile(path.clone())),
        None => None,
    };

    let layers = [
        (Some(defaults), Scope::Default),
        (user_layer.map(|l| l.json), Scope::User),
        (Some(env_layer), Scope::Env),
        (cli_config_layer.map(|l| l.json), Scope::CliConfig),
        (Some(flags_layer), Scope::Flags),
    ];

    let mut json = serde_json::json!({});
    let mut provenance = Provenance::default();
    for (layer, scope) in layers {
        if let Some(layer) = layer {
            provenance.record_layer(&layer, scope);
            merge::merge_two_json(&mut json, layer);
        }
    }

    Ok(Resolved { json, provenance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hx_domain_types::{DayStart, DurationUnit};
    use serde_json::json;
    use std::path::PathBuf;

    fn no_files() -> paths::Paths {
        paths::Paths {
            user: None,
            cli_config: None,
        }
    }

    #[test]
    fn test_defaults_only() {
        let resolved = load_all(&no_files(), json!({}), json!({})).unwrap();
        let settings = resolved.settings().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(settings.summary);
        assert_eq!(resolved.provenance.winner_of("unit"), Some(Scope::Default));
    }

    #[test]
    fn test_flags_beat_env() {
        let resolved = load_all(
            &no_files(),
            json!({"unit": "minutes", "day-start": "04:00"}),
            json!({"unit": "hours"}),
        )
        .unwrap();
        let settings = resolved.settings().unwrap();

        assert_eq!(settings.unit, DurationUnit::Hours);
        assert_eq!(settings.day_start, DayStart::parse("04:00").unwrap());
        assert_eq!(resolved.provenance.winner_of("unit"), Some(Scope::Flags));
        assert_eq!(resolved.provenance.winner_of("day-start"), Some(Scope::Env));
    }

    #[test]
    fn test_missing_cli_config_is_an_error() {
        let paths = paths::Paths {
            user: Some(PathBuf::from("/nonexistent/user.toml")),
            cli_config: Some(PathBuf::from("/nonexistent/extra.toml")),
        };
        let err = load_all(&paths, json!({}), json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_bad_day_start_fails_extraction() {
        let resolved = load_all(&no_files(), json!({"day-start": "late"}), json!({})).unwrap();
        let err = resolved.settings().unwrap_err();
        assert!(err.to_string().contains("day-start"));
    }

    #[test]
    fn test_unknown_env_key_is_rejected() {
        let err = load_all(&no_files(), json!({"colour": "red"}), json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::Schema { scope: Scope::Env, .. }));
    }
}
