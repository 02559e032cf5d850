//! Read-modify-write orchestration around the pure streak transition.

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;
use crate::sync::StreakRecord;

use super::engine::{record_activity, DayBoundary, StreakState, StreakUpdate};

/// Local persistence port for the streak state.
pub trait StreakStore {
    /// Load the persisted state.
    ///
    /// Implementations degrade missing or unreadable values to the unset
    /// state rather than failing the activity path.
    fn load_streak(&self) -> Result<StreakState, DatabaseError>;

    /// Persist the state, replacing whatever was stored before.
    fn save_streak(&self, state: &StreakState) -> Result<(), DatabaseError>;
}

/// Best-effort remote mirror port.
///
/// Implementations must not block the caller and must swallow every
/// failure; the tracker never observes the outcome of a publish.
pub trait StreakSink: Send + Sync {
    fn publish(&self, record: StreakRecord);
}

/// Sink that drops every record. Used when no sync identity is configured.
pub struct NullSink;

impl StreakSink for NullSink {
    fn publish(&self, _record: StreakRecord) {}
}

/// Streak façade: load state, apply the transition, persist, mirror.
pub struct StreakTracker<S: StreakStore> {
    store: S,
    sink: Option<Box<dyn StreakSink>>,
    boundary: DayBoundary,
}

impl<S: StreakStore> StreakTracker<S> {
    pub fn new(store: S, boundary: DayBoundary) -> Self {
        Self {
            store,
            sink: None,
            boundary,
        }
    }

    /// Attach a remote mirror. Without one, operation is local-only.
    pub fn with_sink(mut self, sink: Box<dyn StreakSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Record one qualifying activity at `now`.
    ///
    /// The state is written back on every path, including idempotent
    /// same-day re-entry, so the stored day stays normalized. The mirror
    /// publish is fire-and-forget: it cannot fail this call and its outcome
    /// is never observed.
    pub fn record(&self, now: DateTime<Utc>) -> Result<StreakUpdate, DatabaseError> {
        let previous = self.store.load_streak().unwrap_or_default();
        let update = record_activity(now, &previous, self.boundary);
        self.store.save_streak(&update.state)?;

        if let Some(sink) = &self.sink {
            sink.publish(StreakRecord::from_state(&update.state, self.boundary));
        }

        Ok(update)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
