// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory report that the spreadsheet is rendered from

use chrono::{NaiveDate, NaiveDateTime};
use hx_domain_types::{DateRange, DayStart, Fact};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Which facts make it into a report
///
/// Name lists are matched case-insensitively and any entry may match. An
/// empty list lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactFilter {
    pub categories: Vec<String>,
    pub activities: Vec<String>,
    pub tags: Vec<String>,
    /// Substring looked up in activity, category, description and tags
    pub search: Option<String>,
}

impl FactFilter {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.activities.is_empty()
            && self.tags.is_empty()
            && self.search.is_none()
    }

    pub fn matches(&self, fact: &Fact) -> bool {
        if !any_equal(&self.categories, std::iter::once(fact.category.as_str())) {
            return false;
        }
        if !any_equal(&self.activities, std::iter::once(fact.activity.as_str())) {
            return false;
        }
        if !any_equal(&self.tags, fact.tags.iter().map(String::as_str)) {
            return false;
        }

        match self.search.as_deref().map(str::to_lowercase) {
            None => true,
            Some(needle) => std::iter::once(fact.activity.as_str())
                .chain(std::iter::once(fact.category.as_str()))
                .chain(fact.description.as_deref())
                .chain(fact.tags.iter().map(String::as_str))
                .any(|haystack| haystack.to_lowercase().contains(&needle)),
        }
    }
}

fn any_equal<'a>(wanted: &[String], mut values: impl Iterator<Item = &'a str>) -> bool {
    wanted.is_empty()
        || values.any(|value| {
            let value = value.to_lowercase();
            wanted.iter().any(|w| w.to_lowercase() == value)
        })
}

/// A fact placed on its logical day
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub fact: Fact,
    pub day: NaiveDate,
    /// End used for the duration; the generation time for ongoing facts
    pub effective_end: NaiveDateTime,
    pub minutes: f64,
}

/// Aggregated time for one activity, category, day or tag
#[derive(Debug, Clone, PartialEq)]
pub struct Total {
    pub key: String,
    pub minutes: f64,
    pub facts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub range: DateRange,
    pub day_start: DayStart,
    pub generated_at: NaiveDateTime,
    pub rows: Vec<ReportRow>,
    pub by_activity: Vec<Total>,
    pub by_category: Vec<Total>,
    pub by_day: Vec<Total>,
    pub by_tag: Vec<Total>,
    pub total_minutes: f64,
}

impl Report {
    /// Build a report from facts fetched for `range`
    ///
    /// Facts are attributed to the logical day they start on; those starting
    /// outside the range are dropped even if they overlap it.
    pub fn build(
        range: DateRange,
        day_start: DayStart,
        facts: Vec<Fact>,
        filter: &FactFilter,
        now: NaiveDateTime,
    ) -> Self {
        let fetched = facts.len();
        let rows: Vec<ReportRow> = facts
            .into_iter()
            .filter(|fact| filter.matches(fact))
            .filter_map(|fact| {
                let day = day_start.day_of(fact.start);
                if !range.contains(day) {
                    return None;
                }
                let effective_end = fact.effective_end(now);
                let seconds = (fact.duration(now).num_milliseconds() as f64 / 1000.0).round();
                let minutes = seconds / 60.0;
                Some(ReportRow {
                    fact,
                    day,
                    effective_end,
                    minutes,
                })
            })
            .collect();
        debug!(fetched, kept = rows.len(), "built report rows");

        let by_activity = totals(&rows, |row| vec![row.fact.qualified_activity()]);
        let by_category = totals(&rows, |row| vec![row.fact.category.clone()]);
        let by_tag = totals(&rows, |row| row.fact.tags.clone());

        let mut per_day: HashMap<NaiveDate, (f64, usize)> = HashMap::new();
        for row in &rows {
            let entry = per_day.entry(row.day).or_default();
            entry.0 += row.minutes;
            entry.1 += 1;
        }
        let by_day = range
            .days()
            .map(|day| {
                let (minutes, facts) = per_day.get(&day).copied().unwrap_or_default();
                Total {
                    key: day.format("%Y-%m-%d").to_string(),
                    minutes,
                    facts,
                }
            })
            .collect();

        let total_minutes = rows.iter().map(|row| row.minutes).sum();

        Self {
            range,
            day_start,
            generated_at: now,
            rows,
            by_activity,
            by_category,
            by_day,
            by_tag,
            total_minutes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_tags(&self) -> bool {
        !self.by_tag.is_empty()
    }

    /// Share of the report total, 0 for an empty report
    pub fn share(&self, minutes: f64) -> f64 {
        if self.total_minutes > 0.0 {
            minutes / self.total_minutes
        } else {
            0.0
        }
    }
}

fn totals<F>(rows: &[ReportRow], keys: F) -> Vec<Total>
where
    F: Fn(&ReportRow) -> Vec<String>,
{
    let mut acc: HashMap<String, Total> = HashMap::new();
    for row in rows {
        for key in keys(row) {
            let total = acc.entry(key.clone()).or_insert_with(|| Total {
                key,
                minutes: 0.0,
                facts: 0,
            });
            total.minutes += row.minutes;
            total.facts += 1;
        }
    }

    let mut totals: Vec<Total> = acc.into_values().collect();
    totals.sort_by(|a, b| {
        b.minutes
            .partial_cmp(&a.minutes)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    totals
}
