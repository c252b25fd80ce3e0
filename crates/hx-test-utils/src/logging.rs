// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-test log files
//!
//! Each test writes its narrative to `target/test-logs/<date>/<name>-<time>-<uuid>.log`.
//! Passing tests print one line; failing tests print the log path and size.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TestLogError {
    #[error("test log io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid test name: {name}")]
    InvalidTestName { name: String },
}

pub struct TestLogger {
    log_path: PathBuf,
    writer: BufWriter<File>,
    test_name: String,
    start_time: DateTime<Utc>,
}

impl TestLogger {
    pub fn new(test_name: &str) -> Result<Self, TestLogError> {
        if test_name.is_empty() || test_name.len() > 200 {
            return Err(TestLogError::InvalidTestName {
                name: test_name.to_string(),
            });
        }

        let log_path = create_unique_test_log(test_name)?;
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(&log_path)?;
        let start_time = Utc::now();

        let mut logger = Self {
            log_path,
            writer: BufWriter::new(file),
            test_name: test_name.to_string(),
            start_time,
        };
        writeln!(logger.writer, "=== hamster-xls test log ===")?;
        writeln!(logger.writer, "Test: {}", logger.test_name)?;
        writeln!(
            logger.writer,
            "Started: {}",
            logger.start_time.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(logger.writer)?;
        logger.writer.flush()?;

        Ok(logger)
    }

    pub fn log(&mut self, message: impl AsRef<str>) -> Result<(), TestLogError> {
        let timestamp = Utc::now().format("%H:%M:%S%.3f");
        writeln!(self.writer, "[{}] {}", timestamp, message.as_ref())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn finish_success(mut self) -> Result<PathBuf, TestLogError> {
        let elapsed = Utc::now().signed_duration_since(self.start_time);
        self.log(format!(
            "passed in {:.3}s",
            elapsed.num_milliseconds() as f64 / 1000.0
        ))?;
        println!("✅ {} passed", self.test_name);
        Ok(self.log_path)
    }

    pub fn finish_failure(mut self, error_message: &str) -> Result<PathBuf, TestLogError> {
        self.log(format!("failed: {}", error_message))?;
        let size = fs::metadata(&self.log_path).map(|m| m.len()).unwrap_or(0);
        println!(
            "❌ {} failed - Log: {} ({} bytes)",
            self.test_name,
            self.log_path.display(),
            size
        );
        Ok(self.log_path)
    }
}

/// Create a unique log path for `test_name`, creating its directory
pub fn create_unique_test_log(test_name: &str) -> Result<PathBuf, TestLogError> {
    let now = Utc::now();
    let log_dir = find_workspace_root()
        .join("target")
        .join("test-logs")
        .join(now.format("%Y-%m-%d").to_string());
    fs::create_dir_all(&log_dir)?;

    let filename = format!(
        "{}-{}-{}.log",
        sanitize_filename(test_name),
        now.format("%H-%M-%S"),
        Uuid::new_v4()
    );
    Ok(log_dir.join(filename))
}

/// Nearest ancestor whose Cargo.toml declares a `[workspace]`
fn find_workspace_root() -> PathBuf {
    let current_dir = env::current_dir().unwrap_or_else(|_| env::temp_dir());
    current_dir
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .map(|content| content.contains("[workspace]"))
                .unwrap_or(false)
        })
        .map(Path::to_path_buf)
        .unwrap_or(current_dir)
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}
