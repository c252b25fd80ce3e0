// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Read-only access to the Hamster time tracker's SQLite database
//!
//! The database is never written to. Facts are returned with their activity,
//! category and tags already resolved.

pub mod db;
pub mod discover;
pub mod error;
pub mod timestamp;

pub use db::HamsterDb;
pub use discover::{default_candidates, discover_database, discover_in};
pub use error::{DbError, Result};
