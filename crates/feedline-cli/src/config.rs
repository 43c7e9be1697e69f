//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use feedline_aggregator::DEFAULT_DAY_WINDOW;
use feedline_batch::BatchConfig;
use feedline_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".feedline";
const CONFIG_FILE: &str = "config.toml";
const ARCHIVE_FILE: &str = "schedules.json";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where archived schedules live (defaults to ~/.feedline/schedules.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_path: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Batch tuning
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Days ahead the dashboard treats as upcoming
    #[serde(default = "default_day_window")]
    pub day_window: u32,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(app_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from `path`, or the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the embedded library configurations.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate()?;
        self.batch.validate()?;
        Ok(())
    }

    /// Resolved archive location.
    pub fn archive_path(&self) -> Result<PathBuf> {
        match &self.archive_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir()?.join(ARCHIVE_FILE)),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            day_window: DEFAULT_DAY_WINDOW,
        }
    }
}

fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(APP_DIR))
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_day_window() -> u32 {
    DEFAULT_DAY_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.settings.day_window, 30);
        assert_eq!(config.batch.concurrency, 4);
        assert!(config.archive_path.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.archive_path = Some(dir.path().join("archive.json"));
        config.settings.format = OutputFormat::Json;
        config.batch.concurrency = 2;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.archive_path().unwrap(), dir.path().join("archive.json"));
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nday_window = 14\n\n[batch]\nconcurrency = 8\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.day_window, 14);
        assert!(config.settings.color);
        assert_eq!(config.batch.concurrency, 8);
        assert_eq!(config.extractor, ExtractorConfig::default());
    }

    #[test]
    fn test_invalid_library_config_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[batch]\nconcurrency = 0\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Batch(_))));
    }
}
