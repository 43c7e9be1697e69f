//! Feedline CLI - Command-line interface for feed delivery schedules.

use clap::Parser;
use feedline_cli::commands;
use feedline_cli::{Archive, Cli, Command, Config, Formatter};
use feedline_extractor::ScheduleExtractor;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> feedline_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            let extractor = ScheduleExtractor::new(config.extractor.clone())?;
            commands::execute_extract(args, &extractor, &formatter).await?;
        }
        Command::Ingest(args) => {
            let mut archive = Archive::load(config.archive_path()?)?;
            commands::execute_ingest(args, &config, &mut archive, &formatter).await?;
        }
        Command::Dashboard(args) => {
            let archive = Archive::load(config.archive_path()?)?;
            commands::execute_dashboard(args, &config, &archive, &formatter)?;
        }
        Command::List => {
            let archive = Archive::load(config.archive_path()?)?;
            commands::execute_list(&archive, &formatter)?;
        }
        Command::Delete(args) => {
            let mut archive = Archive::load(config.archive_path()?)?;
            commands::execute_delete(args, &mut archive, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
