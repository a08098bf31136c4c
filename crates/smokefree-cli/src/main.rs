use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "smokefree-cli", version, about = "smokefree CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show time smoke-free, cigarettes avoided, money saved and streaks
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Refresh the status line periodically
    Watch {
        /// Seconds between refreshes (defaults to refresh.interval_secs)
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many refreshes
        #[arg(long)]
        count: Option<u64>,
    },
    /// Mark a day as smoke-free (today by default)
    CheckIn {
        /// Day to mark, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove a check-in (today by default)
    UndoCheckIn {
        /// Day to unmark, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a month with check-ins marked
    Calendar {
        /// Month to show, YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Tracked settings (quit date, consumption, price)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SMOKEFREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Watch { interval, count } => commands::status::watch(interval, count),
        Commands::CheckIn { date } => commands::checkin::run(date.as_deref()),
        Commands::UndoCheckIn { date } => commands::checkin::undo(date.as_deref()),
        Commands::Calendar { month, json } => commands::calendar::run(month.as_deref(), json),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
