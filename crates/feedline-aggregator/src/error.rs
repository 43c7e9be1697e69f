//! Error types for aggregation

use thiserror::Error;

/// Errors returned to callers of the Aggregation Engine
///
/// Unrecognized document content never raises; only malformed filter
/// parameters do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregatorError {
    /// A filter parameter could not be interpreted
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}
