//! wordgap CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wordgap_core::model::AnswerMode;

mod commands;

use commands::StoreArgs;

#[derive(Parser)]
#[command(
    name = "wordgap",
    version,
    about = "Adaptive fill-in-the-letters vocabulary practice"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    Play {
        #[command(flatten)]
        store: StoreArgs,

        /// Answer mode: typed or choice
        #[arg(long)]
        mode: Option<AnswerMode>,

        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check a vocabulary file for malformed or duplicate lines
    Validate {
        /// Path to the vocabulary file
        #[arg(long)]
        vocab: PathBuf,
    },

    /// Install a custom vocabulary file (resets progress)
    Load {
        #[command(flatten)]
        store: StoreArgs,

        /// Path to a .txt vocabulary file
        #[arg(long)]
        file: PathBuf,
    },

    /// Write the vocabulary currently in use
    Export {
        #[command(flatten)]
        store: StoreArgs,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show per-word progress and totals
    Stats {
        #[command(flatten)]
        store: StoreArgs,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Erase progress and lifetime totals (the high score is kept)
    Reset {
        #[command(flatten)]
        store: StoreArgs,

        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Create a starter config and vocabulary file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordgap=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { store, mode, seed } => commands::play::execute(store, mode, seed),
        Commands::Validate { vocab } => commands::validate::execute(vocab),
        Commands::Load { store, file } => commands::load::execute(store, file),
        Commands::Export { store, output } => commands::export::execute(store, output),
        Commands::Stats { store, format } => commands::stats::execute(store, format),
        Commands::Reset { store, yes } => commands::reset::execute(store, yes),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
