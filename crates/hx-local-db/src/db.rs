// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Read-only queries against a Hamster database

use hx_domain_types::{Fact, TimeWindow, UNKNOWN_ACTIVITY, UNSORTED_CATEGORY};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::{DbError, Result};
use crate::timestamp;

const REQUIRED_TABLES: &[&str] = &["facts", "activities", "categories"];

const FACTS_IN_WINDOW: &str = "
    SELECT f.id, f.start_time, f.end_time, f.description, a.name, c.name
    FROM facts f
    LEFT JOIN activities a ON a.id = f.activity_id
    LEFT JOIN categories c ON c.id = a.category_id
    WHERE replace(f.start_time, 'T', ' ') < ?2
      AND (f.end_time IS NULL OR replace(f.end_time, 'T', ' ') > ?1)
    ORDER BY replace(f.start_time, 'T', ' '), f.id";

const TAGS_IN_WINDOW: &str = "
    SELECT ft.fact_id, t.name
    FROM fact_tags ft
    JOIN tags t ON t.id = ft.tag_id
    JOIN facts f ON f.id = ft.fact_id
    WHERE replace(f.start_time, 'T', ' ') < ?2
      AND (f.end_time IS NULL OR replace(f.end_time, 'T', ' ') > ?1)";

/// Open handle on a Hamster database
pub struct HamsterDb {
    conn: Connection,
    path: PathBuf,
    has_tags: bool,
}

impl std::fmt::Debug for HamsterDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HamsterDb")
            .field("path", &self.path)
            .field("has_tags", &self.has_tags)
            .finish()
    }
}

impl HamsterDb {
    /// Open read-only and check that the Hamster tables are present
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DbError::MissingFile(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let tables = list_tables(&conn).map_err(|e| DbError::NotHamsterDatabase {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let missing: Vec<&str> =
            REQUIRED_TABLES.iter().copied().filter(|t| !tables.contains(*t)).collect();
        if !missing.is_empty() {
            return Err(DbError::NotHamsterDatabase {
                path: path.to_path_buf(),
                reason: format!("missing tables: {}", missing.join(", ")),
            });
        }

        let has_tags = tables.contains("tags") && tables.contains("fact_tags");
        debug!(path = %path.display(), has_tags, "opened Hamster database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            has_tags,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of the `version` table, when there is one
    pub fn schema_version(&self) -> Option<i64> {
        self.conn
            .query_row("SELECT version FROM version LIMIT 1", [], |row| row.get(0))
            .optional()
            .ok()
            .flatten()
    }

    /// Facts overlapping the window, ordered by start time then id
    #[instrument(level = "debug", skip(self), fields(from = %window.from, to = %window.to))]
    pub fn facts_in(&self, window: &TimeWindow) -> Result<Vec<Fact>> {
        let from = timestamp::to_sql(window.from);
        let to = timestamp::to_sql(window.to);

        let mut tags = if self.has_tags {
            self.tags_in(&from, &to)?
        } else {
            HashMap::new()
        };

        let mut stmt = self.conn.prepare(FACTS_IN_WINDOW)?;
        let rows = stmt.query_map(params![from, to], |row| {
            Ok(RawFact {
                id: row.get(0)?,
                start: row.get(1)?,
                end: row.get(2)?,
                description: row.get(3)?,
                activity: row.get(4)?,
                category: row.get(5)?,
            })
        })?;

        let mut facts = Vec::new();
        for raw in rows {
            let raw = raw?;
            let mut fact = raw.into_fact()?;
            fact.tags = tags.remove(&fact.id).unwrap_or_default();
            fact.normalize_tags();
            facts.push(fact);
        }

        debug!(count = facts.len(), "loaded facts");
        Ok(facts)
    }

    fn tags_in(&self, from: &str, to: &str) -> Result<HashMap<i64, Vec<String>>> {
        let mut stmt = self.conn.prepare(TAGS_IN_WINDOW)?;
        let rows = stmt.query_map(params![from, to], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            let (fact_id, name) = row?;
            tags.entry(fact_id).or_default().push(name);
        }
        Ok(tags)
    }
}

struct RawFact {
    id: i64,
    start: String,
    end: Option<String>,
    description: Option<String>,
    activity: Option<String>,
    category: Option<String>,
}

impl RawFact {
    fn into_fact(self) -> Result<Fact> {
        let bad = |value: &str| DbError::BadTimestamp {
            fact_id: self.id,
            value: value.to_string(),
        };

        let start = timestamp::parse(&self.start).ok_or_else(|| bad(&self.start))?;
        let end = match self.end.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(timestamp::parse(value).ok_or_else(|| bad(value))?),
        };

        Ok(Fact {
            id: self.id,
            activity: non_empty(self.activity).unwrap_or_else(|| UNKNOWN_ACTIVITY.to_string()),
            category: non_empty(self.category).unwrap_or_else(|| UNSORTED_CATEGORY.to_string()),
            start,
            end,
            description: non_empty(self.description),
            tags: Vec::new(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn list_tables(conn: &Connection) -> rusqlite::Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
    names.collect()
}
