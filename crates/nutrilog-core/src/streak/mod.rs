//! Daily logging streak.
//!
//! The transition itself is a pure function ([`record_activity`]) over an
//! explicit [`StreakState`]; [`StreakTracker`] wires it to a storage port
//! and an optional remote mirror.

mod engine;
mod milestones;
mod tracker;

pub use engine::{record_activity, DayBoundary, StreakKind, StreakState, StreakUpdate};
pub use tracker::{NullSink, StreakSink, StreakStore, StreakTracker};
