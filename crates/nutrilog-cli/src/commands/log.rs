use chrono::{DateTime, Utc};
use clap::Args;
use nutrilog_core::journal::JournalEntry;
use nutrilog_core::storage::{Config, Database};
use nutrilog_core::streak::{DayBoundary, StreakTracker};
use nutrilog_core::sync::RealtimeMirror;

#[derive(Args)]
pub struct LogArgs {
    /// Name of the food or meal
    pub food_name: String,
    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Activity timestamp (RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<String>,
}

pub fn run(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = match &args.at {
        Some(ts) => DateTime::parse_from_rfc3339(ts)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let config = Config::load_or_default();
    let db = Database::open()?;

    let entry = JournalEntry::new(&args.food_name, &args.description, now)?;
    db.insert_entry(&entry)?;

    let boundary = DayBoundary::with_offset_hours(config.streak.timezone_offset_hours);
    let mut tracker = StreakTracker::new(db, boundary);
    if let Some((database_url, user_id)) = config.sync.identity() {
        match RealtimeMirror::new(database_url, user_id) {
            Ok(mirror) => tracker = tracker.with_sink(Box::new(mirror)),
            Err(e) => eprintln!("warning: streak mirroring disabled: {e}"),
        }
    }

    // The fire-and-forget mirror write needs a runtime to land on; it is
    // not awaited, but runtime shutdown grants it a bounded grace period.
    let runtime = tokio::runtime::Runtime::new()?;
    let update = runtime.block_on(async { tracker.record(now) })?;
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));

    println!("Logged: {}", entry.food_name);
    println!("{}", update.message);
    Ok(())
}
