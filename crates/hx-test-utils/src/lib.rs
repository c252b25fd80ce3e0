// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Test utilities for hamster-xls
//!
//! - [`HamsterFixture`] builds a throwaway database with Hamster's schema
//! - [`TestLogger`] gives every test its own log file under `target/test-logs`

pub mod fixture;
pub mod logging;

pub use fixture::{FactRow, FixtureError, HamsterFixture};
pub use logging::{TestLogError, TestLogger, create_unique_test_log};
