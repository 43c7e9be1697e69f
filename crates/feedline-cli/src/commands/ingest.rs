//! Ingest command implementation.

use crate::archive::Archive;
use crate::cli::IngestArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use feedline_batch::{BatchOrchestrator, DocumentRef, TextFileSource};
use feedline_extractor::ScheduleExtractor;
use std::sync::Arc;
use tokio::sync::watch;

/// Execute the ingest command.
pub async fn execute_ingest(
    args: IngestArgs,
    config: &Config,
    archive: &mut Archive,
    formatter: &Formatter,
) -> Result<()> {
    let mut batch_config = config.batch.clone();
    if let Some(concurrency) = args.concurrency {
        batch_config.concurrency = concurrency;
    }

    let extractor = ScheduleExtractor::new(config.extractor.clone())?;
    let mut orchestrator =
        BatchOrchestrator::new(batch_config, extractor, Arc::new(TextFileSource::new()))?;

    let documents: Vec<DocumentRef> = args
        .files
        .iter()
        .map(|path| DocumentRef::from(path.as_path()))
        .collect();

    // Ctrl+C stops new documents; in-flight ones still finish
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing in-flight documents");
            let _ = cancel_tx.send(true);
        }
    });

    let show_progress = formatter.format() == OutputFormat::Table;
    let outcome = orchestrator
        .run_until_cancelled(documents, cancel_rx, |progress| {
            if show_progress {
                eprint!("\r{}", formatter.progress(progress));
            }
        })
        .await;
    interrupt.abort();
    if show_progress {
        eprintln!();
    }
    let outcome = outcome?;

    println!("{}", formatter.format_batch(&outcome)?);
    tracing::info!("{}", orchestrator.metrics().summary());

    if args.dry_run {
        if formatter.format() == OutputFormat::Table {
            println!("{}", formatter.info("Dry run, nothing archived"));
        }
        return Ok(());
    }

    if outcome.successful.is_empty() {
        return Ok(());
    }

    let archived = outcome.successful.len();
    for success in outcome.successful {
        archive.add(success.document.to_string(), success.schedule);
    }
    archive.save()?;

    if formatter.format() == OutputFormat::Table {
        println!(
            "{}",
            formatter.success(&format!(
                "Archived {} schedule(s) to {}",
                archived,
                archive.path().display()
            ))
        );
    }

    Ok(())
}
