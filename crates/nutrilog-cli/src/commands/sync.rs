use clap::Subcommand;
use nutrilog_core::storage::{Config, Database};
use nutrilog_core::streak::{DayBoundary, StreakStore};
use nutrilog_core::sync::{RealtimeMirror, StreakRecord};

#[derive(Subcommand)]
pub enum SyncAction {
    /// Push the current streak record to the remote mirror and wait
    Push,
    /// Show mirror configuration
    Status,
}

pub fn run(action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        SyncAction::Push => {
            let (database_url, user_id) = config
                .sync
                .identity()
                .ok_or("sync is not configured; set sync.database_url and sync.user_id")?;

            let db = Database::open()?;
            let state = db.load_streak()?;
            if state.is_unset() {
                println!("No meals logged yet; nothing to push.");
                return Ok(());
            }

            let boundary = DayBoundary::with_offset_hours(config.streak.timezone_offset_hours);
            let record = StreakRecord::from_state(&state, boundary);
            let mirror = RealtimeMirror::new(database_url, user_id)?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(mirror.put_streak(&record))?;
            println!("Pushed streak {} to {}", record.streak, mirror.endpoint());
        }
        SyncAction::Status => {
            match config.sync.identity() {
                Some((database_url, user_id)) => {
                    println!("Mirroring enabled for {user_id} at {database_url}");
                }
                None if !config.sync.enabled => println!("Mirroring disabled."),
                None => println!("Mirroring not configured (local-only)."),
            }
        }
    }
    Ok(())
}
