//! CLI command definitions.
//!
//! This module defines the command structure for the tfgen CLI.

use clap::{Parser, Subcommand};

pub mod generate;
pub mod providers;

/// tfgen - Terraform project scaffolding
#[derive(Parser)]
#[command(name = "tfgen")]
#[command(version, about = "tfgen - Terraform project scaffolding")]
#[command(long_about = r#"
tfgen renders a Terraform file tree for a product, or for each of its
customers, from a generator configuration and a directory of templates.

COMMANDS:
  generate   → Generate providers.tf, main.tf, variables.tf and tfvars files
  providers  → List supported cloud providers and their aliases

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error
  5 - Configuration error
  6 - I/O error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Terraform file tree
    Generate(generate::GenerateArgs),

    /// List supported cloud providers
    Providers(providers::ProvidersArgs),
}
