//! Configuration for the Extractor

use crate::error::ExtractorError;
use feedline_domain::delivery::{MAX_DELIVERY_WEIGHT, MIN_DELIVERY_WEIGHT};
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Smallest accepted delivery weight (inclusive)
    #[serde(default = "default_min_weight")]
    pub min_weight: f64,

    /// Largest accepted delivery weight (inclusive)
    #[serde(default = "default_max_weight")]
    pub max_weight: f64,

    /// Characters inspected before a date by the proximity fallback
    #[serde(default = "default_window_before")]
    pub window_before_chars: usize,

    /// Characters inspected after a date by the proximity fallback
    #[serde(default = "default_window_after")]
    pub window_after_chars: usize,
}

fn default_min_weight() -> f64 {
    MIN_DELIVERY_WEIGHT
}

fn default_max_weight() -> f64 {
    MAX_DELIVERY_WEIGHT
}

fn default_window_before() -> usize {
    100
}

fn default_window_after() -> usize {
    200
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_weight: default_min_weight(),
            max_weight: default_max_weight(),
            window_before_chars: default_window_before(),
            window_after_chars: default_window_after(),
        }
    }
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if !self.min_weight.is_finite() || !self.max_weight.is_finite() {
            return Err(ExtractorError::Config(
                "weight bounds must be finite".to_string(),
            ));
        }
        if self.min_weight <= 0.0 {
            return Err(ExtractorError::Config(
                "min_weight must be greater than 0".to_string(),
            ));
        }
        if self.min_weight > self.max_weight {
            return Err(ExtractorError::Config(format!(
                "min_weight {} exceeds max_weight {}",
                self.min_weight, self.max_weight
            )));
        }
        if self.window_after_chars == 0 {
            return Err(ExtractorError::Config(
                "window_after_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
