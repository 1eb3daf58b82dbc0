//! Error types for cidocgraph Core

use thiserror::Error;

/// Result type alias using cidocgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// cidocgraph error types
#[derive(Error, Debug)]
pub enum Error {
    /// A class or attribute key has no registered identifier
    #[error("Not in mapping: {0}")]
    NotInMapping(String),

    /// A leaf value cannot be turned into a literal
    #[error("Invalid type for a literal: {0}")]
    InvalidType(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Reserved attribute name: {0}")]
    ReservedAttribute(String),

    #[error("Invalid entity document: {0}")]
    InvalidDocument(String),

    #[error("Mapping source error: {0}")]
    MappingSource(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the errors a generation run can abort with
    pub fn is_generation_error(&self) -> bool {
        matches!(self, Self::NotInMapping(_) | Self::InvalidType(_))
    }
}
