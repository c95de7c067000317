//! tfgen CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error
//! - 5: Configuration error
//! - 6: I/O error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tfgen_iac::IacError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const CONFIG_ERROR: u8 = 5;
    pub const IO_ERROR: u8 = 6;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let directives = if cli.quiet {
        "error"
    } else if cli.verbose {
        "tfgen=debug,info"
    } else {
        "tfgen=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    // A subscriber may already be installed; keep going with it.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, cli.quiet),
        Commands::Providers(args) => commands::providers::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.chain().find_map(|cause| cause.downcast_ref::<IacError>()) {
        return match err {
            IacError::Validation(_) | IacError::ProviderNotFound(_) => ExitCodes::VALIDATION_FAILURE,
            IacError::Template(_) => ExitCodes::TEMPLATE_ERROR,
            IacError::Config(_) => ExitCodes::CONFIG_ERROR,
            IacError::DirectoryCreation { .. } | IacError::FileWrite { .. } => ExitCodes::IO_ERROR,
        };
    }

    if e.chain().any(|cause| cause.is::<serde_json::Error>()) {
        ExitCodes::INVALID_ARGS
    } else if e.chain().any(|cause| cause.is::<std::io::Error>()) {
        ExitCodes::IO_ERROR
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
