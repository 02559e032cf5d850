use clap::Subcommand;
use nutrilog_core::storage::Database;
use nutrilog_core::streak::StreakStore;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current streak state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StreakAction::Status { json } => {
            let db = Database::open()?;
            let state = db.load_streak()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                match state.last_activity_day {
                    Some(day) => println!("Streak: {} (last logged {day})", state.streak_count),
                    None => println!("No meals logged yet."),
                }
            }
        }
    }
    Ok(())
}
