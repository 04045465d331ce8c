//! Error types for template construction.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while building or serializing a template.
///
/// All of these are structural errors raised at build time; a template
/// build either completes or fails, there is no partial-failure mode.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Logical name already in use: {0}")]
    DuplicateName(String),

    #[error("Invalid value for field {field} of {entity}: {message}")]
    InvalidField {
        entity: String,
        field: String,
        message: String,
    },

    #[error("Unresolved reference from {referrer} to {target}")]
    UnresolvedReference { referrer: String, target: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
