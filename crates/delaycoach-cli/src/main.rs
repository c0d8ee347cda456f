use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "delaycoach", version, about = "DelayCoach deadline tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Progress check-ins
    Checkin {
        #[command(subcommand)]
        action: commands::checkin::CheckinAction,
    },
    /// Rank open tasks by bomb score
    Bombs {
        /// Number of tasks to show (default: ranking.top_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the risk tier for a score
    Risk {
        /// Bomb score, 0-100
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,
    },
    /// Procrastination profile and activity trend
    Analyze {
        /// Time range: 7, 30 or all
        #[arg(long, default_value = "7")]
        range: delaycoach_core::TimeRange,
    },
    /// Coach message for the most at-risk task
    Coach,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Load the demo task set
    Seed {
        /// Replace existing tasks
        #[arg(long)]
        force: bool,
    },
    /// Delete all tasks and check-ins and restore default settings
    Reset,
}

fn init_tracing() {
    // Opt-in via RUST_LOG; an unparseable filter falls back to off.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let now = Utc::now();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, now),
        Commands::Checkin { action } => commands::checkin::run(action, now),
        Commands::Bombs { limit } => commands::bombs::run(limit, now),
        Commands::Risk { score } => commands::risk::run(score),
        Commands::Analyze { range } => commands::analyze::run(range, now),
        Commands::Coach => commands::coach::run(now),
        Commands::Config { action } => commands::config::run(action),
        Commands::Seed { force } => commands::seed::run(force, now),
        Commands::Reset => commands::reset::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
