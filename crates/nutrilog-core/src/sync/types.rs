//! Core types for streak mirroring.

use serde::{Deserialize, Serialize};

use crate::streak::{DayBoundary, StreakState};

/// Wire form of the mirrored streak state.
///
/// Serializes as `{"streak": N, "lastLoggedDate": epoch_millis}`, the
/// record shape other devices on the account consume. `lastLoggedDate` is
/// the midnight instant of the last activity day in the reference offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub streak: u32,
    pub last_logged_date: i64,
}

impl StreakRecord {
    pub fn from_state(state: &StreakState, boundary: DayBoundary) -> Self {
        Self {
            streak: state.streak_count,
            last_logged_date: state
                .last_activity_day
                .map(|day| boundary.midnight_millis(day))
                .unwrap_or(0),
        }
    }
}

/// Sync error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid sync endpoint: {0}")]
    Endpoint(String),

    #[error("Remote rejected write: HTTP {0}")]
    Status(u16),

    #[error("No authenticated user configured")]
    MissingIdentity,
}
