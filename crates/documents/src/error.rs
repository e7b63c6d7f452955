//! Error types for document encoding and decoding

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding or decoding documents
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes are not valid JSON at all
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON but not shaped like a document envelope
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Known document type whose payload does not match the schema
    #[error("Schema mismatch for document type '{tag}': {reason}")]
    SchemaMismatch { tag: String, reason: String },
}
