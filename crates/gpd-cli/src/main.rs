//! # gpd CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// General purpose datatypes: load, inspect, validate and compare schema
/// documents.
#[derive(Parser, Debug)]
#[command(name = "gpd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load a schema document and report whether it builds.
    Check(gpd_cli::check::CheckArgs),
    /// List declared types and their categories.
    Types(gpd_cli::types::TypesArgs),
    /// Validate raw values against a named type.
    Validate(gpd_cli::validate::ValidateArgs),
    /// Compare two named types for equality and restriction.
    Compare(gpd_cli::compare::CompareArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // RUST_LOG overrides; quiet by default.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    let ok = match &cli.command {
        Commands::Check(args) => gpd_cli::check::run(args, &mut out)?,
        Commands::Types(args) => gpd_cli::types::run(args, &mut out)?,
        Commands::Validate(args) => gpd_cli::validate::run(args, &mut out)?,
        Commands::Compare(args) => gpd_cli::compare::run(args, &mut out)?,
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
