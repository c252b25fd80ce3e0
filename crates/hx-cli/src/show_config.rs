// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `--show-config`: flattened settings with the layer each value came from

use hx_config::{Provenance, Resolved};
use serde_json::Value;
use std::io::{self, Write};

pub fn print<W: Write>(resolved: &Resolved, out: &mut W) -> io::Result<()> {
    print_value(&resolved.json, "", &resolved.provenance, out)
}

fn print_value<W: Write>(
    value: &Value,
    prefix: &str,
    provenance: &Provenance,
    out: &mut W,
) -> io::Result<()> {
    match value {
        Value::Object(obj) => {
            for (key, child) in obj {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                print_value(child, &full_key, provenance, out)?;
            }
            Ok(())
        }
        Value::Null => writeln!(out, "{prefix} is unset"),
        _ => match provenance.winner_of(prefix) {
            Some(scope) => writeln!(out, "{prefix}={value} (from {scope})"),
            None => writeln!(out, "{prefix}={value}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hx_config::{Scope, paths::Paths};
    use serde_json::json;

    #[test]
    fn test_values_are_listed_with_their_origin() {
        let paths = Paths {
            user: None,
            cli_config: None,
        };
        let resolved = hx_config::load_all(
            &paths,
            json!({"day-start": "05:00"}),
            json!({"unit": "minutes"}),
        )
        .unwrap();
        assert_eq!(resolved.provenance.winner_of("unit"), Some(Scope::Flags));

        let mut out = Vec::new();
        print(&resolved, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("day-start=\"05:00\" (from environment)"), "{text}");
        assert!(text.contains("unit=\"minutes\" (from command line)"), "{text}");
        assert!(text.contains("summary=true (from default)"), "{text}");
        assert!(text.contains("database is unset"), "{text}");
    }
}
