//! Error types for IaC generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur while generating a Terraform tree.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Specified provider not found in configuration: {0}")]
    ProviderNotFound(String),

    #[error("Config error: {0}")]
    Config(#[from] tfgen_config::ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] tfgen_templates::TemplateError),

    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
