//! Error types for batch operations

use thiserror::Error;

/// Errors that can occur setting up or running a batch
///
/// Per-document problems are never errors; they become
/// [`FailureReason`](crate::FailureReason)s in the outcome.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Errors raised by a document source while acquiring text
#[derive(Error, Debug)]
pub enum SourceError {
    /// The referenced document does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Reading the document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid text
    #[error("Decode error: {0}")]
    Decode(String),
}
