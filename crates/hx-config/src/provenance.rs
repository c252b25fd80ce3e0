// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Provenance tracking for configuration values

use serde_json::Value as J;
use std::collections::BTreeMap;
use std::fmt;

/// Configuration layers, lowest precedence first
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Scope {
    Default,
    User,
    Env,
    CliConfig,
    Flags,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Default => "default",
            Scope::User => "user config",
            Scope::Env => "environment",
            Scope::CliConfig => "--config file",
            Scope::Flags => "command line",
        };
        f.write_str(name)
    }
}

/// Which layer set each dotted key, and the values it went through
#[derive(Default, Clone, Debug)]
pub struct Provenance {
    pub winner: BTreeMap<String, Scope>,
    pub changes: BTreeMap<String, Vec<(Scope, J)>>,
}

impl Provenance {
    /// Record every leaf of `layer` as set by `scope`
    ///
    /// Null leaves leave the merged value untouched and are not recorded.
    pub fn record_layer(&mut self, layer: &J, scope: Scope) {
        self.record_at(layer, scope, "");
    }

    fn record_at(&mut self, value: &J, scope: Scope, prefix: &str) {
        match value {
            J::Object(obj) => {
                for (k, v) in obj {
                    let pfx = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{}.{}", prefix, k)
                    };
                    self.record_at(v, scope, &pfx);
                }
            }
            J::Null => {}
            _ => {
                self.winner.insert(prefix.to_string(), scope);
                self.changes.entry(prefix.to_string()).or_default().push((scope, value.clone()));
            }
        }
    }

    pub fn winner_of(&self, dotted: &str) -> Option<Scope> {
        self.winner.get(dotted).copied()
    }
}
