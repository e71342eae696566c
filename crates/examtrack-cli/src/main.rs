//! examtrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "examtrack", version, about = "Practice test scoring and statistics engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a completed attempt and commit its stats
    Submit {
        /// Path to .toml test bank file or directory
        #[arg(long)]
        bank: PathBuf,

        /// Path to the attempt JSON file
        #[arg(long)]
        attempt: PathBuf,

        /// Snapshot file holding attempt history and stats
        #[arg(long, default_value = "./examtrack-data.json")]
        data: PathBuf,

        /// Credit corrections to previously wrong answers
        #[arg(long)]
        allow_recredit: bool,
    },

    /// Show cumulative stats and per-subject performance
    Stats {
        /// Snapshot file holding attempt history and stats
        #[arg(long, default_value = "./examtrack-data.json")]
        data: PathBuf,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List stored attempts, newest first
    History {
        /// Snapshot file holding attempt history and stats
        #[arg(long, default_value = "./examtrack-data.json")]
        data: PathBuf,

        /// Only attempts for this test id
        #[arg(long)]
        test: Option<String>,
    },

    /// Validate test bank TOML files
    Validate {
        /// Path to test bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create a starter test bank and sample attempt
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examtrack=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Submit {
            bank,
            attempt,
            data,
            allow_recredit,
        } => commands::submit::execute(bank, attempt, data, allow_recredit).await,
        Commands::Stats { data, format } => commands::stats::execute(data, format),
        Commands::History { data, test } => commands::history::execute(data, test),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
