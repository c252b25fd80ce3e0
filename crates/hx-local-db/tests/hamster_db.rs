// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDate;
use hx_domain_types::{DateRange, DayStart, UNKNOWN_ACTIVITY, UNSORTED_CATEGORY};
use hx_local_db::{DbError, HamsterDb};
use hx_test_utils::{FactRow, HamsterFixture, TestLogger};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn march_first() -> hx_domain_types::TimeWindow {
    DateRange::single(day(2024, 3, 1)).window(DayStart::default())
}

#[test]
fn test_facts_in_window_are_resolved_and_ordered() {
    let mut logger = TestLogger::new("test_facts_in_window_are_resolved_and_ordered").unwrap();
    let fixture = HamsterFixture::new().unwrap();

    fixture
        .add_fact("review", "Work", "2024-03-01 13:00:00", Some("2024-03-01 14:00:00"))
        .unwrap();
    fixture
        .add(FactRow {
            activity: "coding",
            category: Some("Work"),
            start: "2024-03-01 09:00:00",
            end: Some("2024-03-01 10:30:00"),
            description: Some("parser"),
            tags: &["urgent", "billable"],
        })
        .unwrap();
    fixture
        .add_fact("coding", "Work", "2024-03-02 09:00:00", Some("2024-03-02 10:00:00"))
        .unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    assert_eq!(db.schema_version(), Some(9));

    let facts = db.facts_in(&march_first()).unwrap();
    logger.log(format!("loaded {} facts", facts.len())).unwrap();

    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].activity, "coding");
    assert_eq!(facts[0].category, "Work");
    assert_eq!(facts[0].description.as_deref(), Some("parser"));
    assert_eq!(facts[0].tags, vec!["billable", "urgent"]);
    assert_eq!(facts[1].activity, "review");
    assert!(facts[1].tags.is_empty());

    logger.finish_success().unwrap();
}

#[test]
fn test_overlapping_and_ongoing_facts_are_included() {
    let fixture = HamsterFixture::new().unwrap();

    // Crosses midnight into the window
    fixture
        .add_fact("deploy", "Ops", "2024-02-29 23:00:00", Some("2024-03-01 01:00:00"))
        .unwrap();
    // Ends exactly where the window starts
    fixture
        .add_fact("standup", "Work", "2024-02-29 23:30:00", Some("2024-03-01 00:00:00"))
        .unwrap();
    // Still running
    fixture.add_fact("coding", "Work", "2024-03-01 16:00:00", None).unwrap();
    // Starts at the window end
    fixture.add_fact("coding", "Work", "2024-03-02 00:00:00", None).unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    let facts = db.facts_in(&march_first()).unwrap();

    let activities: Vec<_> = facts.iter().map(|f| f.activity.as_str()).collect();
    assert_eq!(activities, vec!["deploy", "coding"]);
    assert!(facts[1].is_ongoing());
}

#[test]
fn test_unsorted_and_missing_activity_fallbacks() {
    let fixture = HamsterFixture::new().unwrap();
    fixture
        .add(FactRow {
            activity: "reading",
            category: None,
            start: "2024-03-01 08:00:00",
            end: Some("2024-03-01 08:30:00"),
            description: Some("   "),
            ..Default::default()
        })
        .unwrap();
    fixture
        .connection()
        .execute(
            "INSERT INTO facts (activity_id, start_time, end_time) \
             VALUES (999, '2024-03-01 11:00:00', '2024-03-01 11:15:00')",
            [],
        )
        .unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    let facts = db.facts_in(&march_first()).unwrap();

    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].category, UNSORTED_CATEGORY);
    assert_eq!(facts[0].description, None);
    assert_eq!(facts[1].activity, UNKNOWN_ACTIVITY);
    assert_eq!(facts[1].category, UNSORTED_CATEGORY);
}

#[test]
fn test_day_start_shifts_the_window() {
    let fixture = HamsterFixture::new().unwrap();
    fixture
        .add_fact("late", "Work", "2024-03-02 02:00:00", Some("2024-03-02 03:00:00"))
        .unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    let range = DateRange::single(day(2024, 3, 1));

    assert!(db.facts_in(&range.window(DayStart::default())).unwrap().is_empty());
    let shifted = db.facts_in(&range.window(DayStart::parse("05:00").unwrap())).unwrap();
    assert_eq!(shifted.len(), 1);
}

#[test]
fn test_t_separated_timestamps_are_windowed() {
    let fixture = HamsterFixture::new().unwrap();
    fixture
        .add_fact("late", "Work", "2024-03-02T02:00:00", Some("2024-03-02T03:00:00"))
        .unwrap();
    fixture
        .add_fact("early", "Work", "2024-03-02T06:00:00", Some("2024-03-02T07:00:00"))
        .unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    let range = DateRange::single(day(2024, 3, 1));
    let facts = db.facts_in(&range.window(DayStart::parse("05:00").unwrap())).unwrap();

    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].activity, "late");
    assert_eq!(facts[0].start, day(2024, 3, 2).and_hms_opt(2, 0, 0).unwrap());
}

#[test]
fn test_bad_timestamp_is_reported_with_fact_id() {
    let fixture = HamsterFixture::new().unwrap();
    let id = fixture.add_fact("coding", "Work", "2024-03-01 09:00:00", None).unwrap();
    fixture
        .connection()
        .execute("UPDATE facts SET end_time = '2024-03-01 late' WHERE id = ?1", [id])
        .unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    let err = db.facts_in(&march_first()).unwrap_err();
    assert!(matches!(err, DbError::BadTimestamp { fact_id, .. } if fact_id == id));
}

#[test]
fn test_database_without_tag_tables_still_reads() {
    let fixture = HamsterFixture::new().unwrap();
    fixture
        .add_fact("coding", "Work", "2024-03-01 09:00:00", Some("2024-03-01 09:30:00"))
        .unwrap();
    fixture.connection().execute_batch("DROP TABLE fact_tags; DROP TABLE tags;").unwrap();

    let db = HamsterDb::open(fixture.path()).unwrap();
    let facts = db.facts_in(&march_first()).unwrap();
    assert_eq!(facts.len(), 1);
    assert!(facts[0].tags.is_empty());
}

#[test]
fn test_open_rejects_foreign_files() {
    let dir = tempfile::tempdir().unwrap();

    let text = dir.path().join("notes.db");
    std::fs::write(&text, "definitely not sqlite\n".repeat(64)).unwrap();
    assert!(matches!(
        HamsterDb::open(&text).unwrap_err(),
        DbError::NotHamsterDatabase { .. }
    ));

    let other = dir.path().join("other.db");
    rusqlite::Connection::open(&other)
        .unwrap()
        .execute_batch("CREATE TABLE things (id integer primary key);")
        .unwrap();
    let err = HamsterDb::open(&other).unwrap_err();
    assert!(err.to_string().contains("missing tables"));

    let missing = dir.path().join("missing.db");
    assert!(matches!(HamsterDb::open(&missing).unwrap_err(), DbError::MissingFile(_)));
}

#[test]
fn test_open_is_read_only() {
    let fixture = HamsterFixture::new().unwrap();
    let db = HamsterDb::open(fixture.path()).unwrap();
    let before = std::fs::read(fixture.path()).unwrap();

    db.facts_in(&march_first()).unwrap();

    assert_eq!(std::fs::read(fixture.path()).unwrap(), before);
}
