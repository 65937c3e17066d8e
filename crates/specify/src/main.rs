//! Specify CLI - Bootstrap Spec-Driven Development projects
//!
//! This is the main entry point for the Specify command-line interface.

mod cli;
mod commands;
mod output;
mod tracker;
mod version;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize rustls crypto provider before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Run command
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args).await,
        Commands::Version(args) => commands::version::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            output::error_panel(commands::init::failure_title(&e), &format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with appropriate verbosity.
///
/// Logs go to stderr so they never interleave with the step display on stdout.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
