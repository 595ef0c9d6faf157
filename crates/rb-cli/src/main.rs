//! Terminal driver for the Reboot narrative runtime.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_SAVE_DIR: &str = ".reboot";

#[derive(Parser)]
#[command(
    name = "reboot",
    about = "Reboot: wake a machine, then try to leave it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play {
        /// Seed for the first game
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Directory holding save slots
        #[arg(long, default_value = DEFAULT_SAVE_DIR)]
        save_dir: PathBuf,

        /// Resume from the auto slot
        #[arg(long = "continue")]
        resume: bool,

        /// Typing delay per message, in virtual milliseconds
        #[arg(long, default_value = "1200")]
        reveal_ms: u64,
    },

    /// List loadable save slots
    Slots {
        /// Directory holding save slots
        #[arg(long, default_value = DEFAULT_SAVE_DIR)]
        save_dir: PathBuf,
    },

    /// Print a save record as JSON
    Inspect {
        /// Slot to print: `auto` or a number
        slot: String,

        /// Directory holding save slots
        #[arg(long, default_value = DEFAULT_SAVE_DIR)]
        save_dir: PathBuf,
    },

    /// Validate a dialogue script and the action step mapping
    Check {
        /// JSON script to check (default: the built-in script)
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            seed,
            save_dir,
            resume,
            reveal_ms,
        } => commands::play::run(&save_dir, seed, resume, reveal_ms),
        Commands::Slots { save_dir } => commands::slots::run(&save_dir),
        Commands::Inspect { slot, save_dir } => commands::inspect::run(&save_dir, &slot),
        Commands::Check { script } => commands::check::run(script.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
