// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment variable and command-line overlays

use serde_json::Value as J;

use crate::error::Result;
use crate::merge::{insert_dotted, kebab_keys};

/// Prefix of environment variables read as configuration
pub const ENV_PREFIX: &str = "HAMSTER_XLS";

/// Overlay from `HAMSTER_XLS_*` variables of the current process
pub fn env_overlay() -> Result<J> {
    env_overlay_from(None)
}

/// Overlay from `HAMSTER_XLS_*` variables
///
/// `HAMSTER_XLS_DAY_START` maps to `day-start`, and a double underscore
/// descends into a table: `HAMSTER_XLS_LOGGING__LOG_LEVEL` is `logging.log-level`.
/// Passing `Some(vars)` reads from that map instead of the process environment.
pub fn env_overlay_from(vars: Option<config::Map<String, String>>) -> Result<J> {
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(vars),
        )
        .build()?;

    let mut map = built.try_deserialize::<serde_json::Map<String, J>>()?;
    // HAMSTER_XLS_HOME locates the config file, it is not a setting
    map.remove("home");
    if let Some(summary) = map.get_mut("summary") {
        coerce_bool(summary);
    }
    Ok(kebab_keys(J::Object(map)))
}

/// Values arrive as strings; only boolean settings are converted
fn coerce_bool(value: &mut J) {
    let parsed = match value.as_str() {
        Some(s) if s.eq_ignore_ascii_case("true") => true,
        Some(s) if s.eq_ignore_ascii_case("false") => false,
        _ => return,
    };
    *value = J::Bool(parsed);
}

/// Overlay from typed command-line values keyed by dotted path
pub fn flags_overlay(pairs: &[(&str, J)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in pairs {
        insert_dotted(&mut root, k, v.clone());
    }
    root
}
