//! Configuration for batch processing

use crate::BatchError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Batch Orchestrator
///
/// # Examples
///
/// ```
/// use feedline_batch::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.concurrency, 4);
///
/// let config = BatchConfig::sequential();
/// assert_eq!(config.concurrency, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Documents processed at the same time (at least 1)
    /// Default: 4
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Longest a single document may spend acquiring its text (in seconds)
    /// Default: 60
    #[serde(default = "default_document_timeout")]
    pub document_timeout_secs: u64,
}

fn default_concurrency() -> usize {
    4
}

fn default_document_timeout() -> u64 {
    60
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            document_timeout_secs: default_document_timeout(),
        }
    }
}

impl BatchConfig {
    /// One document at a time
    pub fn sequential() -> Self {
        Self {
            concurrency: 1,
            ..Self::default()
        }
    }

    /// Get the per-document timeout as a Duration
    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.concurrency == 0 {
            return Err(BatchError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.document_timeout_secs == 0 {
            return Err(BatchError::Config(
                "document_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, BatchError> {
        toml::from_str(toml_str)
            .map_err(|e| BatchError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, BatchError> {
        toml::to_string_pretty(self)
            .map_err(|e| BatchError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.document_timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sequential_config() {
        let config = BatchConfig::sequential();
        assert_eq!(config.concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = BatchConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BatchError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = BatchConfig {
            document_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = BatchConfig {
            concurrency: 8,
            document_timeout_secs: 5,
        };
        let serialized = config.to_toml().unwrap();
        let deserialized = BatchConfig::from_toml(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml() {
        let config = BatchConfig::from_toml("concurrency = 2").unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.document_timeout_secs, 60);
    }
}
