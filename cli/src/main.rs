//! # tarrs Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the tarrs CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`tar`, `list`) is defined as a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! Report lines go to stdout; logs and errors go to stderr.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! tarrs --help
//!
//! # Archive the current directory with increased verbosity
//! tarrs -vv tar --file out.tgz
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command arguments and handlers (tar, list)
mod common; // Shared utilities (archive, fs)
mod core; // Core infrastructure (errors, config)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "tarrs",
    about = "tarrs: build tar and tar.gz archives from Ant-style globs",
    long_about = "Pack the files under a directory that match an Ant-style glob into a tar or\n\
                  tar.gz archive. The archive never contains itself, and an existing archive\n\
                  is only replaced when asked to.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "t")]
    Tar(commands::tarball::TarArgs),
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Tar(args) => commands::tarball::handle_tar(args).await,
        Commands::List(args) => commands::list::handle_list(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn tarrs_cmd() -> Command {
        Command::cargo_bin("tarrs").expect("Failed to find tarrs binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        tarrs_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        tarrs_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
