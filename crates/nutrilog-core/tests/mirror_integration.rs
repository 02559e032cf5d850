//! Integration tests for the remote streak mirror.
//!
//! The mirror is contractually best-effort: a dead or rejecting remote
//! must never be observable through the tracker.

use chrono::{DateTime, TimeZone, Utc};
use mockito::Matcher;
use nutrilog_core::storage::Database;
use nutrilog_core::streak::{DayBoundary, StreakTracker};
use nutrilog_core::sync::{RealtimeMirror, StreakRecord, SyncError};
use tempfile::TempDir;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[tokio::test]
async fn test_put_streak_writes_account_scoped_record() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/users/user-1/streakData.json")
        .match_body(Matcher::Json(serde_json::json!({
            "streak": 6,
            "lastLoggedDate": 1_704_153_600_000i64,
        })))
        .with_status(200)
        .create_async()
        .await;

    let mirror = RealtimeMirror::new(&server.url(), "user-1").unwrap();
    let record = StreakRecord {
        streak: 6,
        last_logged_date: 1_704_153_600_000,
    };
    mirror.put_streak(&record).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_put_streak_surfaces_rejection_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PUT", "/users/user-1/streakData.json")
        .with_status(401)
        .create_async()
        .await;

    let mirror = RealtimeMirror::new(&server.url(), "user-1").unwrap();
    let record = StreakRecord {
        streak: 1,
        last_logged_date: 0,
    };
    match mirror.put_streak(&record).await {
        Err(SyncError::Status(401)) => {}
        other => panic!("expected HTTP 401 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fire_and_forget_publish_lands() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/users/user-1/streakData.json")
        .match_body(Matcher::Json(serde_json::json!({
            "streak": 1,
            "lastLoggedDate": 1_709_596_800_000i64,
        })))
        .with_status(200)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let db = Database::open_at(&dir.path().join("nutrilog.db")).unwrap();
    let mirror = RealtimeMirror::new(&server.url(), "user-1").unwrap();
    let tracker = StreakTracker::new(db, DayBoundary::utc()).with_sink(Box::new(mirror));

    let update = tracker.record(at(2024, 3, 5, 9)).unwrap();
    assert_eq!(update.state.streak_count, 1);

    // The publish is spawned, not awaited; poll the mock until it lands.
    let mut matched = false;
    for _ in 0..100 {
        if mock.matched_async().await {
            matched = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert!(matched, "mirror write never reached the server");
}

#[tokio::test]
async fn test_rejecting_remote_does_not_affect_local_state() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PUT", Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let db = Database::open_at(&dir.path().join("nutrilog.db")).unwrap();
    let mirror = RealtimeMirror::new(&server.url(), "user-1").unwrap();
    let tracker = StreakTracker::new(db, DayBoundary::utc()).with_sink(Box::new(mirror));

    let first = tracker.record(at(2024, 3, 5, 9)).unwrap();
    let second = tracker.record(at(2024, 3, 6, 9)).unwrap();

    assert_eq!(first.state.streak_count, 1);
    assert_eq!(second.state.streak_count, 2);
    assert!(second.message.contains("rhythm"));
}

#[tokio::test]
async fn test_unreachable_remote_does_not_affect_local_state() {
    // Nothing listens on this port; the spawned publish fails on connect.
    let mirror = RealtimeMirror::new("http://127.0.0.1:1", "user-1").unwrap();

    let dir = TempDir::new().unwrap();
    let db = Database::open_at(&dir.path().join("nutrilog.db")).unwrap();
    let tracker = StreakTracker::new(db, DayBoundary::utc()).with_sink(Box::new(mirror));

    let update = tracker.record(at(2024, 3, 5, 9)).unwrap();
    assert_eq!(update.state.streak_count, 1);
    assert!(update.message.contains("Streak: 1"));
}
