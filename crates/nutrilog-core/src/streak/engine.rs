//! Day-granularity streak transition logic.
//!
//! An activity extends the streak when it lands on the calendar day after
//! the previous one, resets it after a gap of two or more days, and is a
//! no-op when it lands on the same day again. Both sides of the comparison
//! are normalized to a calendar day in a fixed reference offset before
//! subtracting, so daylight-saving shifts and fractional-day drift cannot
//! skew the count.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::milestones;

/// Fixed reference offset used to cut calendar days at midnight.
///
/// The offset is a whole number of hours east of UTC. It is configured
/// once, not taken from the device zone, so the boundary does not move
/// when the user travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBoundary {
    offset_hours: i32,
}

impl DayBoundary {
    /// Midnight-UTC day boundary.
    pub fn utc() -> Self {
        Self { offset_hours: 0 }
    }

    /// Day boundary at a fixed offset, clamped to the valid -12..=14 range.
    pub fn with_offset_hours(hours: i32) -> Self {
        Self {
            offset_hours: hours.clamp(-12, 14),
        }
    }

    pub fn offset_hours(&self) -> i32 {
        self.offset_hours
    }

    /// Calendar day an instant falls on.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        let offset = FixedOffset::east_opt(self.offset_hours * 3600)
            .unwrap_or(FixedOffset::east_opt(0).expect("zero offset is valid"));
        instant.with_timezone(&offset).date_naive()
    }

    /// Epoch milliseconds of a day's midnight in this reference offset.
    pub fn midnight_millis(&self, day: NaiveDate) -> i64 {
        day.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
            - i64::from(self.offset_hours) * 3_600_000
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}

/// Persisted streak state.
///
/// Invariant: `streak_count >= 1` exactly when `last_activity_day` is set;
/// the default value is the "never logged" state with a count of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    /// Calendar day of the most recent activity, in the reference offset.
    pub last_activity_day: Option<NaiveDate>,
    /// Consecutive days with at least one activity, ending at that day.
    pub streak_count: u32,
}

impl StreakState {
    pub fn is_unset(&self) -> bool {
        self.last_activity_day.is_none()
    }
}

/// How an activity affected the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakKind {
    /// First activity ever recorded.
    Started,
    /// Activity on the day after the previous one.
    Extended,
    /// Gap of two or more days; streak restarted at 1.
    Reset,
    /// Another activity on an already-counted day. Also covers a clock
    /// that moved backward across the boundary.
    AlreadyLogged,
}

/// Result of one streak transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub state: StreakState,
    pub kind: StreakKind,
    /// Human-readable streak line with milestone copy.
    pub message: String,
}

/// Apply one qualifying activity at `now` to `state`.
///
/// Pure: persistence and mirroring are the caller's concern. The returned
/// state always carries today's normalized day, including on the idempotent
/// same-day path, so the stored day stays pinned to a midnight boundary.
pub fn record_activity(
    now: DateTime<Utc>,
    state: &StreakState,
    boundary: DayBoundary,
) -> StreakUpdate {
    let today = boundary.day_of(now);

    let (count, kind) = match state.last_activity_day {
        None => (1, StreakKind::Started),
        Some(last) => {
            // Integer day arithmetic on normalized dates, never raw
            // millisecond division.
            let diff_days = today.signed_duration_since(last).num_days();
            if diff_days == 1 {
                (state.streak_count.saturating_add(1), StreakKind::Extended)
            } else if diff_days > 1 {
                (1, StreakKind::Reset)
            } else {
                // Same day, or the clock moved backward: the day is already
                // counted. The count never drops below 1 once a day is set.
                (state.streak_count.max(1), StreakKind::AlreadyLogged)
            }
        }
    };

    let state = StreakState {
        last_activity_day: Some(today),
        streak_count: count,
    };
    let message = milestones::message_for(count, kind);

    StreakUpdate {
        state,
        kind,
        message,
    }
}
