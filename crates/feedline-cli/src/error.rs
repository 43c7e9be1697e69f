//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor setup error
    #[error("Extractor error: {0}")]
    Extractor(#[from] feedline_extractor::ExtractorError),

    /// Batch setup or runtime error
    #[error("Batch error: {0}")]
    Batch(#[from] feedline_batch::BatchError),

    /// Document could not be read
    #[error("{0}")]
    Source(#[from] feedline_batch::SourceError),

    /// Dashboard filter error
    #[error("{0}")]
    Aggregator(#[from] feedline_aggregator::AggregatorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Archived schedule not found
    #[error("Schedule not found: {0}")]
    NotFound(String),
}
