//! Feedline CLI library.
//!
//! This library provides the core functionality for the Feedline command-line interface,
//! including configuration management, the schedule archive, command execution, and
//! output formatting.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use archive::Archive;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
