//! Terminal frontend for Teller: validate story folders and play stories in
//! a simulated chat.

mod adapter;
mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "teller",
    about = "Teller — branching stories told one message at a time",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every story document and report what was loaded
    Check {
        /// Directory containing story documents (.yaml, .yml, .json)
        #[arg(short, long, default_value = "stories")]
        dir: PathBuf,
    },

    /// List the stories in a table
    List {
        /// Directory containing story documents
        #[arg(short, long, default_value = "stories")]
        dir: PathBuf,
    },

    /// Play stories in a chat simulated on stdin/stdout
    Play {
        /// Directory containing story documents
        #[arg(short, long, default_value = "stories")]
        dir: PathBuf,

        /// Chat id for lines without an `@<id>` prefix
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        chat: i64,

        /// Session snapshot file, loaded at start and saved at exit
        #[arg(short, long)]
        sessions: Option<PathBuf>,

        /// YAML file overriding reply texts and the reset keyword
        #[arg(long)]
        config: Option<PathBuf>,
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
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::List { dir } => commands::list::run(&dir),
        Commands::Play {
            dir,
            chat,
            sessions,
            config,
        } => commands::play::run(&dir, chat, sessions.as_deref(), config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
