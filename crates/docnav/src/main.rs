//! docnav CLI - Documentation navigation resolver.
//!
//! Provides commands for:
//! - `check`: Validate every sidebar and markdown cross-reference
//! - `nav`: Print the resolved navigation of one sidebar as JSON
//! - `config`: Print the effective site configuration as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ConfigArgs, NavArgs};
use output::Output;

/// docnav - Documentation navigation resolver.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (show discovery and resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check sidebars and markdown links for unresolved documents.
    Check(CheckArgs),
    /// Print the resolved navigation of a sidebar.
    Nav(NavArgs),
    /// Print the effective site configuration.
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
