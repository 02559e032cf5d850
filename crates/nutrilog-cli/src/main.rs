use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nutrilog", version, about = "Nutrilog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a meal and update the daily streak
    Log(commands::log::LogArgs),
    /// Streak state
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Food journal management
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Remote mirror management
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log(args) => commands::log::run(args),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Sync { action } => commands::sync::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
