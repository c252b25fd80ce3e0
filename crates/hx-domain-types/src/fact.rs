// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Time-tracking facts as recorded by Hamster

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Category shown for activities that were never filed under one
pub const UNSORTED_CATEGORY: &str = "Unsorted";

/// Activity name used when a fact points at a missing activity row
pub const UNKNOWN_ACTIVITY: &str = "(unknown activity)";

/// One tracked stretch of time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub id: i64,
    pub activity: String,
    pub category: String,
    pub start: NaiveDateTime,
    /// `None` while the activity is still being tracked
    pub end: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl Fact {
    pub fn new(id: i64, activity: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            id,
            activity: activity.into(),
            category: UNSORTED_CATEGORY.to_string(),
            start,
            end: None,
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.normalize_tags();
        self
    }

    /// Sort and deduplicate tags
    pub fn normalize_tags(&mut self) {
        self.tags.sort();
        self.tags.dedup();
    }

    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    /// Recorded end, or `now` for ongoing facts; never before `start`
    pub fn effective_end(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end.unwrap_or(now).max(self.start)
    }

    pub fn duration(&self, now: NaiveDateTime) -> Duration {
        self.effective_end(now) - self.start
    }

    /// Hamster's `activity@category` notation
    pub fn qualified_activity(&self) -> String {
        format!("{}@{}", self.activity, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_closed_fact_duration() {
        let fact = Fact::new(1, "coding", at(9, 0)).with_end(at(10, 30));
        assert!(!fact.is_ongoing());
        assert_eq!(fact.duration(at(23, 0)), Duration::minutes(90));
    }

    #[test]
    fn test_ongoing_fact_runs_until_now() {
        let fact = Fact::new(1, "coding", at(9, 0));
        assert!(fact.is_ongoing());
        assert_eq!(fact.effective_end(at(9, 45)), at(9, 45));
        assert_eq!(fact.duration(at(9, 45)), Duration::minutes(45));
    }

    #[test]
    fn test_duration_never_negative() {
        let ongoing = Fact::new(1, "coding", at(9, 0));
        assert_eq!(ongoing.duration(at(8, 0)), Duration::zero());

        let inverted = Fact::new(2, "coding", at(9, 0)).with_end(at(8, 0));
        assert_eq!(inverted.duration(at(12, 0)), Duration::zero());
    }

    #[test]
    fn test_tags_are_sorted_and_unique() {
        let fact = Fact::new(1, "coding", at(9, 0)).with_tags(["b", "a", "b"]);
        assert_eq!(fact.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_default_category_and_qualified_name() {
        let fact = Fact::new(1, "coding", at(9, 0));
        assert_eq!(fact.category, UNSORTED_CATEGORY);
        assert_eq!(
            fact.with_category("Work").qualified_activity(),
            "coding@Work"
        );
    }
}
