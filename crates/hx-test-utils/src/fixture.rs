// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Scratch Hamster databases

use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

/// Tables as created by the Hamster applet (schema version 9)
pub const HAMSTER_SCHEMA: &str = r#"
CREATE TABLE version (version integer);
CREATE TABLE categories (
    id integer primary key,
    name varchar2(500),
    color_code varchar2(50),
    category_order integer,
    search_name varchar2
);
CREATE TABLE activities (
    id integer primary key,
    name varchar2(500),
    work integer,
    activity_order integer,
    deleted integer,
    category_id integer,
    search_name varchar2
);
CREATE TABLE facts (
    id integer primary key,
    activity_id integer,
    start_time timestamp,
    end_time timestamp,
    description varchar2
);
CREATE TABLE tags (
    id integer primary key,
    name text NOT NULL,
    autocomplete BOOL DEFAULT true
);
CREATE TABLE fact_tags (fact_id integer, tag_id integer);
INSERT INTO version (version) VALUES (9);
"#;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture io: {0}")]
    Io(#[from] std::io::Error),

    #[error("fixture sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A fact to insert; `category: None` files the activity as unsorted
#[derive(Debug, Clone, Default)]
pub struct FactRow<'a> {
    pub activity: &'a str,
    pub category: Option<&'a str>,
    pub start: &'a str,
    pub end: Option<&'a str>,
    pub description: Option<&'a str>,
    pub tags: &'a [&'a str],
}

/// A Hamster database in a temporary directory, removed on drop
pub struct HamsterFixture {
    _dir: TempDir,
    path: PathBuf,
    conn: Connection,
}

impl HamsterFixture {
    pub fn new() -> Result<Self, FixtureError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hamster.db");
        let conn = Connection::open(&path)?;
        conn.execute_batch(HAMSTER_SCHEMA)?;
        Ok(Self {
            _dir: dir,
            path,
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw access for tests that need to corrupt or reshape data
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn category(&self, name: &str) -> Result<i64, FixtureError> {
        let existing = self
            .conn
            .query_row("SELECT id FROM categories WHERE name = ?1", [name], |row| row.get(0))
            .optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }
        self.conn.execute(
            "INSERT INTO categories (name, search_name) VALUES (?1, lower(?1))",
            [name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn activity(&self, name: &str, category: Option<&str>) -> Result<i64, FixtureError> {
        // Hamster stores unsorted activities with category -1
        let category_id = match category {
            Some(category) => self.category(category)?,
            None => -1,
        };
        let existing = self
            .conn
            .query_row(
                "SELECT id FROM activities WHERE name = ?1 AND category_id = ?2",
                params![name, category_id],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }
        self.conn.execute(
            "INSERT INTO activities (name, category_id, deleted, search_name) \
             VALUES (?1, ?2, 0, lower(?1))",
            params![name, category_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn tag(&self, name: &str) -> Result<i64, FixtureError> {
        let existing = self
            .conn
            .query_row("SELECT id FROM tags WHERE name = ?1", [name], |row| row.get(0))
            .optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }
        self.conn.execute("INSERT INTO tags (name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a fact and its tags, returning the fact id
    pub fn add(&self, row: FactRow<'_>) -> Result<i64, FixtureError> {
        let activity_id = self.activity(row.activity, row.category)?;
        self.conn.execute(
            "INSERT INTO facts (activity_id, start_time, end_time, description) \
             VALUES (?1, ?2, ?3, ?4)",
            params![activity_id, row.start, row.end, row.description],
        )?;
        let fact_id = self.conn.last_insert_rowid();
        for tag in row.tags {
            let tag_id = self.tag(tag)?;
            self.conn.execute(
                "INSERT INTO fact_tags (fact_id, tag_id) VALUES (?1, ?2)",
                params![fact_id, tag_id],
            )?;
        }
        Ok(fact_id)
    }

    /// Shorthand for a categorised, untagged fact
    pub fn add_fact(
        &self,
        activity: &str,
        category: &str,
        start: &str,
        end: Option<&str>,
    ) -> Result<i64, FixtureError> {
        self.add(FactRow {
            activity,
            category: Some(category),
            start,
            end,
            ..Default::default()
        })
    }
}
