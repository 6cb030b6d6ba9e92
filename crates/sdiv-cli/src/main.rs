//! # sdiv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdiv_cli::draw::{run_draw, DrawArgs};
use sdiv_cli::manifests::{run_manifests, ManifestsArgs};

/// Smart Divination CLI
///
/// Inspects content-pack manifests and runs the same seeded draws the API
/// serves, without a server.
#[derive(Parser, Debug)]
#[command(name = "sdiv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List, validate, or verify pack manifests.
    Manifests(ManifestsArgs),

    /// Run a seeded draw and print the result as JSON.
    Draw(DrawArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Manifests(args) => run_manifests(&args),
        Commands::Draw(args) => run_draw(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
