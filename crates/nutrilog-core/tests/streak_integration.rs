//! Integration tests for the streak flow over real SQLite storage.
//!
//! These tests drive the tracker the way the CLI does: open a database,
//! record activities at explicit instants, and verify what lands on disk.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use nutrilog_core::storage::Database;
use nutrilog_core::streak::{DayBoundary, StreakKind, StreakStore, StreakTracker};
use tempfile::TempDir;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_week_of_logging_with_a_gap() {
    let dir = TempDir::new().unwrap();
    let db = Database::open_at(&dir.path().join("nutrilog.db")).unwrap();
    let tracker = StreakTracker::new(db, DayBoundary::utc());

    // Three consecutive days.
    assert_eq!(tracker.record(at(2024, 3, 4, 8)).unwrap().kind, StreakKind::Started);
    assert_eq!(tracker.record(at(2024, 3, 5, 9)).unwrap().kind, StreakKind::Extended);
    let third = tracker.record(at(2024, 3, 6, 21)).unwrap();
    assert_eq!(third.state.streak_count, 3);
    assert!(third.message.contains("3 days strong"));

    // Two-day gap resets.
    let after_gap = tracker.record(at(2024, 3, 9, 12)).unwrap();
    assert_eq!(after_gap.kind, StreakKind::Reset);
    assert_eq!(after_gap.state.streak_count, 1);
    assert_eq!(after_gap.state.last_activity_day, Some(day(2024, 3, 9)));
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nutrilog.db");

    let update = {
        let db = Database::open_at(&path).unwrap();
        let tracker = StreakTracker::new(db, DayBoundary::utc());
        tracker.record(at(2024, 3, 4, 8)).unwrap();
        tracker.record(at(2024, 3, 5, 8)).unwrap()
    };

    let reopened = Database::open_at(&path).unwrap();
    assert_eq!(reopened.load_streak().unwrap(), update.state);
}

#[test]
fn test_same_day_reentry_is_stable_on_disk() {
    let dir = TempDir::new().unwrap();
    let db = Database::open_at(&dir.path().join("nutrilog.db")).unwrap();
    let tracker = StreakTracker::new(db, DayBoundary::utc());

    let first = tracker.record(at(2024, 3, 4, 8)).unwrap();
    let second = tracker.record(at(2024, 3, 4, 19)).unwrap();

    assert_eq!(second.kind, StreakKind::AlreadyLogged);
    assert_eq!(second.state, first.state);
    assert_eq!(tracker.store().load_streak().unwrap(), first.state);
    assert!(second.message.contains("Already logged today"));
}

#[test]
fn test_concrete_on_fire_example() {
    let dir = TempDir::new().unwrap();
    let db = Database::open_at(&dir.path().join("nutrilog.db")).unwrap();

    // Seed: last logged 2024-01-01 with a 5-day streak.
    db.save_streak(&nutrilog_core::streak::StreakState {
        last_activity_day: Some(day(2024, 1, 1)),
        streak_count: 5,
    })
    .unwrap();

    let tracker = StreakTracker::new(db, DayBoundary::utc());
    let update = tracker.record(at(2024, 1, 2, 9)).unwrap();

    assert_eq!(update.state.streak_count, 6);
    assert_eq!(update.state.last_activity_day, Some(day(2024, 1, 2)));
    assert!(update.message.contains("6"));
    assert!(update.message.contains("on fire"));
}
