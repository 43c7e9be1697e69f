//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Feedline - Extract and review poultry-feed delivery schedules.
#[derive(Debug, Parser)]
#[command(name = "feedline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FEEDLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the schedule from one text document
    Extract(ExtractArgs),

    /// Extract many documents and archive the usable schedules
    Ingest(IngestArgs),

    /// Aggregate archived schedules
    Dashboard(DashboardArgs),

    /// List archived schedules
    List,

    /// Remove archived schedules
    Delete(DeleteArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text file holding the document contents
    pub file: PathBuf,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Text files holding the document contents
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Documents processed at the same time
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Report results without archiving anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the dashboard command.
#[derive(Debug, Parser)]
pub struct DashboardArgs {
    /// Farm code, "Unknown" or "all"
    #[arg(long, default_value = "all")]
    pub farm: String,

    /// Barn label (e.g. B2), "Unknown" or "all"
    #[arg(long, default_value = "all")]
    pub barn: String,

    /// Days ahead counted as upcoming
    #[arg(short, long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Which part of the view to show
    #[arg(long, value_enum, default_value = "overview")]
    pub view: ViewArg,
}

/// Dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewArg {
    /// Summary with per-farm and per-barn totals
    Overview,
    /// Every delivery by date
    Timeline,
    /// Deliveries inside the day window
    Upcoming,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Schedule IDs to delete
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
