//! Remote mirroring of the streak record.
//!
//! Write-only and best-effort: after every local streak write the tracker
//! publishes the updated record to an account-scoped realtime-database
//! path. Nothing is ever read back, and a lost write is repaired by the
//! next activity, which mirrors the full state again.

mod client;
mod types;

pub use client::RealtimeMirror;
pub use types::{StreakRecord, SyncError};
