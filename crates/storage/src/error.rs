//! Error types for the piece store client

use thiserror::Error;

/// Result type alias for piece store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while uploading to or reading from the piece store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure reaching the service
    #[error("Connection error: {0}")]
    Connection(String),

    /// Service answered with a non-success HTTP status
    #[error("Gateway error: {status} {message}")]
    Gateway { status: u16, message: String },

    /// No piece stored under the requested CID
    #[error("Piece not found: {0}")]
    NotFound(String),

    /// Empty piece CID passed to a retrieval operation
    #[error("Piece CID is not provided")]
    MissingPieceCid,

    /// Provider acknowledged a different byte count than was sent
    #[error("Integrity check failed: sent {sent} bytes, provider acknowledged {acknowledged}")]
    Integrity { sent: u64, acknowledged: u64 },

    /// Response body could not be parsed
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// Check if this error is transient and worth retrying by a caller
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Gateway { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
