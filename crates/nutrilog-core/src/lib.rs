//! # Nutrilog Core Library
//!
//! This library provides the core business logic for Nutrilog, a
//! meal-logging companion that keeps a daily logging streak. It implements
//! a CLI-first philosophy where all operations are available via a
//! standalone CLI binary; any GUI shell is a thin layer over the same core
//! library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: a pure, day-granularity transition over persisted
//!   state, wrapped by a read-modify-write tracker
//! - **Journal**: SQLite-backed food journal with glycemic-load analysis
//! - **Storage**: SQLite entry/state storage and TOML-based configuration
//! - **Sync**: write-only, best-effort mirror of the streak record to an
//!   account-scoped realtime-database path
//!
//! ## Key Components
//!
//! - [`record_activity`]: the pure streak transition
//! - [`StreakTracker`]: load, transition, persist, mirror
//! - [`Database`]: journal and streak-state persistence
//! - [`Config`]: application configuration management
//! - [`RealtimeMirror`]: remote mirror client

pub mod error;
pub mod journal;
pub mod storage;
pub mod streak;
pub mod sync;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use journal::{FoodAnalysis, GlycemicLoad, Ingredient, JournalEntry, NutritionTotals};
pub use storage::{Config, Database};
pub use streak::{
    record_activity, DayBoundary, StreakKind, StreakSink, StreakState, StreakStore, StreakTracker,
    StreakUpdate,
};
pub use sync::{RealtimeMirror, StreakRecord, SyncError};
