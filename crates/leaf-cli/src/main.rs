//! Leaf CLI - Command-line interface for the Leaf programming language.

use clap::{Parser, Subcommand};
use leaf_alloc::TrackingAllocator;
use std::path::PathBuf;

mod commands;

/// Every heap allocation made by the process goes through this allocator, so
/// the counters reported at exit cover the source buffer and the token list.
#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator::system();

/// Leaf - A small statically-typed language
#[derive(Parser)]
#[command(name = "leaf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a Leaf file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
        /// Tag reserved words with their keyword kind
        #[arg(long)]
        keywords: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check Leaf files for lexical errors
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
        /// Tag reserved words with their keyword kind
        #[arg(long)]
        keywords: bool,
    },

    /// Tokenize a Leaf file and show token and memory statistics
    Stats {
        /// Input file
        file: PathBuf,
        /// Tag reserved words with their keyword kind
        #[arg(long)]
        keywords: bool,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let result = match cli.command {
        Commands::Lex {
            file,
            keywords,
            json,
        } => commands::lex::run(&file, commands::lexer_config(keywords), json),
        Commands::Check { files, keywords } => {
            commands::check::run(&files, commands::lexer_config(keywords))
        }
        Commands::Stats { file, keywords } => {
            commands::stats::run(&file, commands::lexer_config(keywords), &ALLOCATOR)
        }
    };

    // stderr, so `lex --json` leaves stdout as a single JSON document
    eprintln!("{}", ALLOCATOR.stats());
    result
}
