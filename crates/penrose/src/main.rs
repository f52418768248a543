//! penrose CLI - render penrose diagram code blocks in markdown notes.
//!
//! Provides commands for:
//! - `meta`: Print the directives of a substance program
//! - `trio`: Print the resolved trios of every penrose block in a note
//! - `render`: Render every penrose block in a note through the external compiler

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{MetaArgs, RenderArgs, TrioArgs};
use output::Output;

/// penrose - diagrams in markdown notes.
#[derive(Parser)]
#[command(name = "penrose", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the directives of a substance program.
    Meta(MetaArgs),
    /// Print the resolved trio of every penrose block in a note.
    Trio(TrioArgs),
    /// Render every penrose block in a note.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, &directives))
        .init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = match cli.command {
        Commands::Meta(args) => rt.block_on(args.execute()),
        Commands::Trio(args) => rt.block_on(args.execute()),
        Commands::Render(args) => rt.block_on(args.execute()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Build the log filter.
///
/// `--verbose` enables INFO level, otherwise `directives` (from `RUST_LOG`)
/// apply, falling back to WARN so unreadable diagram references are reported.
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}
