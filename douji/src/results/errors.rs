//! Result sink error types.

use thiserror::Error;

/// Result sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sink refused the record
    #[error("Record rejected: {0}")]
    Rejected(String),
}

/// Result type for result sink operations
pub type SinkResult<T> = Result<T, SinkError>;
