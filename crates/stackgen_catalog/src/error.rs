//! Error types for the resource catalog.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised when a resource constructor is given a disallowed value.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid value for field {field} of {kind}: {message}")]
    InvalidField {
        kind: String,
        field: String,
        message: String,
    },
}

impl CatalogError {
    pub(crate) fn invalid_field(
        kind: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CatalogError::InvalidField {
            kind: kind.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}
