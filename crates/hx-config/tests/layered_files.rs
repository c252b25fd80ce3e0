// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use hx_config::env::{env_overlay_from, flags_overlay};
use hx_config::paths::Paths;
use hx_config::{ConfigError, Scope, load_all};
use hx_domain_types::{DayStart, DurationUnit};
use hx_logging::CliLogLevel;
use hx_test_utils::TestLogger;
use serde_json::json;
use std::path::PathBuf;

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn env(pairs: &[(&str, &str)]) -> serde_json::Value {
    env_overlay_from(Some(
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    ))
    .unwrap()
}

#[test]
fn test_every_layer_in_precedence_order() {
    let mut logger = TestLogger::new("test_every_layer_in_precedence_order").unwrap();
    let dir = tempfile::tempdir().unwrap();

    let user = write(
        &dir,
        "config.toml",
        r#"
            database = "/home/me/.local/share/hamster/hamster.db"
            day-start = "04:00"
            unit = "minutes"
            output-dir = "/home/me/reports"

            [logging]
            log-level = "info"
        "#,
    );
    let extra = write(&dir, "extra.toml", "unit = \"hours\"\nsummary = false\n");
    let paths = Paths {
        user: Some(user),
        cli_config: Some(extra),
    };

    let resolved = load_all(
        &paths,
        env(&[("HAMSTER_XLS_DAY_START", "05:00"), ("HAMSTER_XLS_UNIT", "minutes")]),
        flags_overlay(&[("logging.log-level", json!("trace"))]),
    )
    .unwrap();
    logger.log(format!("merged: {}", resolved.json)).unwrap();

    let settings = resolved.settings().unwrap();
    assert_eq!(
        settings.database,
        Some(PathBuf::from("/home/me/.local/share/hamster/hamster.db"))
    );
    assert_eq!(settings.day_start, DayStart::parse("05:00").unwrap());
    // --config file comes after the environment
    assert_eq!(settings.unit, DurationUnit::Hours);
    assert!(!settings.summary);
    assert_eq!(settings.output_dir, Some(PathBuf::from("/home/me/reports")));
    assert_eq!(settings.logging.log_level, Some(CliLogLevel::Trace));

    let prov = &resolved.provenance;
    assert_eq!(prov.winner_of("database"), Some(Scope::User));
    assert_eq!(prov.winner_of("day-start"), Some(Scope::Env));
    assert_eq!(prov.winner_of("unit"), Some(Scope::CliConfig));
    assert_eq!(prov.winner_of("logging.log-level"), Some(Scope::Flags));
    assert_eq!(prov.changes["unit"].len(), 4);

    logger.finish_success().unwrap();
}

#[test]
fn test_missing_user_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths {
        user: Some(dir.path().join("config.toml")),
        cli_config: None,
    };

    let resolved = load_all(&paths, json!({}), json!({})).unwrap();
    assert_eq!(resolved.provenance.winner_of("summary"), Some(Scope::Default));
}

#[test]
fn test_missing_cli_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let paths = Paths {
        user: None,
        cli_config: Some(missing.clone()),
    };

    match load_all(&paths, json!({}), json!({})).unwrap_err() {
        ConfigError::MissingFile(path) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let broken = write(&dir, "broken.toml", "unit = \n");
    let paths = Paths {
        user: Some(broken),
        cli_config: None,
    };
    assert!(matches!(
        load_all(&paths, json!({}), json!({})).unwrap_err(),
        ConfigError::Toml { .. }
    ));

    let wrong_type = write(&dir, "wrong.toml", "summary = \"yes\"\n");
    let paths = Paths {
        user: Some(wrong_type),
        cli_config: None,
    };
    assert!(matches!(
        load_all(&paths, json!({}), json!({})).unwrap_err(),
        ConfigError::Schema { scope: Scope::User, .. }
    ));
}

#[test]
fn test_bad_day_start_fails_on_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let user = write(&dir, "config.toml", "day-start = \"25:99\"\n");
    let paths = Paths {
        user: Some(user),
        cli_config: None,
    };

    let resolved = load_all(&paths, json!({}), json!({})).unwrap();
    let err = resolved.settings().unwrap_err();
    assert!(err.to_string().contains("day-start"), "{err}");
}
