//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building an extractor
///
/// Extraction itself never fails: unrecognizable text degrades to unknown
/// codes and an empty delivery list.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A delivery pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
