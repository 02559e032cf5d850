use clap::Subcommand;
use nutrilog_core::storage::Database;

#[derive(Subcommand)]
pub enum JournalAction {
    /// List entries, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry
    Show { id: String },
    /// Remove an entry
    Remove { id: String },
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        JournalAction::List { json } => {
            let entries = db.list_entries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("Journal is empty.");
            } else {
                for entry in entries {
                    let load = entry
                        .analysis
                        .as_ref()
                        .map(|a| format!("  [{} GL, {} kcal]", a.glycemic_load.label(), a.calories))
                        .unwrap_or_default();
                    println!(
                        "{}  {}  {}{load}",
                        entry.logged_at.format("%Y-%m-%d %H:%M"),
                        entry.id,
                        entry.food_name
                    );
                }
            }
        }
        JournalAction::Show { id } => match db.get_entry(&id)? {
            Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            None => return Err(format!("no journal entry with id {id}").into()),
        },
        JournalAction::Remove { id } => {
            if db.delete_entry(&id)? {
                println!("Removed {id}");
            } else {
                return Err(format!("no journal entry with id {id}").into());
            }
        }
    }
    Ok(())
}
