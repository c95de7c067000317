//! Error types for templates.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while resolving or rendering templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template parse failed in {template}: {message}")]
    Parse { template: String, message: String },

    #[error("Template rendering failed in {template}: {message}")]
    Render { template: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    /// Classify a minijinja error raised while rendering `template`.
    pub(crate) fn from_engine(template: &str, err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        let message = format!("{:#}", err);
        match err.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(template.to_string()),
            ErrorKind::SyntaxError => TemplateError::Parse {
                template: template.to_string(),
                message,
            },
            _ => TemplateError::Render {
                template: template.to_string(),
                message,
            },
        }
    }
}
