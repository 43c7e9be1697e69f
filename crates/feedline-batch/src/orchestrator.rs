//! Batch Orchestrator: fans the Extractor out over many documents

use crate::outcome::classify;
use crate::{
    BatchConfig, BatchError, BatchFailure, BatchMetrics, BatchOutcome, BatchProgress,
    BatchSuccess, DocumentRef, DocumentSource, FailureReason,
};
use feedline_domain::ScheduleDocument;
use feedline_extractor::{ExtractionReport, ScheduleExtractor};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinSet;

/// What one document turned into
enum DocumentResult {
    Succeeded {
        schedule: ScheduleDocument,
        report: ExtractionReport,
    },
    Failed(FailureReason),
}

/// Runs extraction over a batch of documents with bounded concurrency
///
/// Every document is an independent task. A document that fails, hangs
/// past the configured timeout or panics is reported in the outcome and
/// never stops its siblings.
///
/// # Examples
///
/// ```
/// use feedline_batch::{BatchConfig, BatchOrchestrator, InMemorySource};
/// use feedline_extractor::ScheduleExtractor;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = InMemorySource::new()
///     .with_document("vas-b2.pdf", "VAS B2 12/15/2024 5,250")
///     .with_document("blank.pdf", "nothing here");
/// let documents = source.documents();
///
/// let mut orchestrator = BatchOrchestrator::new(
///     BatchConfig::default(),
///     ScheduleExtractor::default_config()?,
///     Arc::new(source),
/// )?;
///
/// let outcome = orchestrator.run(documents, |_| {}).await?;
/// assert_eq!(outcome.successful.len(), 1);
/// assert_eq!(outcome.failed.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct BatchOrchestrator {
    config: BatchConfig,
    extractor: Arc<ScheduleExtractor>,
    source: Arc<dyn DocumentSource>,
    metrics: BatchMetrics,
}

impl BatchOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        config: BatchConfig,
        extractor: ScheduleExtractor,
        source: Arc<dyn DocumentSource>,
    ) -> Result<Self, BatchError> {
        config.validate()?;
        Ok(Self {
            config,
            extractor: Arc::new(extractor),
            source,
            metrics: BatchMetrics::new(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Metrics accumulated across runs
    pub fn metrics(&self) -> &BatchMetrics {
        &self.metrics
    }

    /// Reset accumulated metrics
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Process every document
    ///
    /// `on_progress` is called once per finished document with the number
    /// completed so far.
    pub async fn run<F>(
        &mut self,
        documents: Vec<DocumentRef>,
        on_progress: F,
    ) -> Result<BatchOutcome, BatchError>
    where
        F: FnMut(BatchProgress),
    {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.run_until_cancelled(documents, cancel_rx, on_progress)
            .await
    }

    /// Process documents until `cancel` turns true
    ///
    /// Cancellation only stops new documents from starting. Documents
    /// already in flight finish and are classified; the rest are listed in
    /// [`BatchOutcome::cancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Worker`] if the runtime loses a document task.
    pub async fn run_until_cancelled<F>(
        &mut self,
        documents: Vec<DocumentRef>,
        mut cancel: watch::Receiver<bool>,
        mut on_progress: F,
    ) -> Result<BatchOutcome, BatchError>
    where
        F: FnMut(BatchProgress),
    {
        let started = Instant::now();
        let total = documents.len();

        tracing::info!(
            documents = total,
            concurrency = self.config.concurrency,
            "Batch started"
        );

        let mut slots: Vec<Option<DocumentResult>> = (0..total).map(|_| None).collect();
        let mut tasks: JoinSet<(usize, DocumentResult)> = JoinSet::new();
        let mut pending = documents.iter().enumerate();
        let mut completed = 0;
        let mut cancelled = false;
        let mut watching = true;

        loop {
            if !cancelled && *cancel.borrow() {
                tracing::info!(
                    in_flight = tasks.len(),
                    "Batch cancelled, finishing in-flight documents"
                );
                cancelled = true;
                watching = false;
            }

            while !cancelled && tasks.len() < self.config.concurrency {
                let Some((index, document)) = pending.next() else {
                    break;
                };
                self.spawn_document(&mut tasks, index, document.clone());
            }

            if tasks.is_empty() {
                break;
            }

            tokio::select! {
                biased;

                changed = cancel.changed(), if watching => {
                    // Sender gone: nobody can cancel any more
                    if changed.is_err() {
                        watching = false;
                    }
                }
                joined = tasks.join_next() => {
                    if let Some(joined) = joined {
                        let (index, result) =
                            joined.map_err(|e| BatchError::Worker(e.to_string()))?;
                        self.record(&documents[index], &result);
                        slots[index] = Some(result);
                        completed += 1;
                        on_progress(BatchProgress { completed, total });
                    }
                }
            }
        }

        let mut outcome = BatchOutcome::default();
        for (document, slot) in documents.into_iter().zip(slots) {
            match slot {
                Some(DocumentResult::Succeeded { schedule, report }) => {
                    outcome.successful.push(BatchSuccess {
                        document,
                        schedule,
                        report,
                    })
                }
                Some(DocumentResult::Failed(reason)) => {
                    outcome.failed.push(BatchFailure { document, reason })
                }
                None => outcome.cancelled.push(document),
            }
        }
        outcome.total_processed = outcome.successful.len() + outcome.failed.len();

        let elapsed = started.elapsed();
        self.metrics.record_cancelled(outcome.cancelled.len());
        self.metrics.record_batch(elapsed.as_millis());

        tracing::info!(
            successful = outcome.successful.len(),
            failed = outcome.failed.len(),
            cancelled = outcome.cancelled.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Batch finished"
        );

        Ok(outcome)
    }

    fn spawn_document(
        &self,
        tasks: &mut JoinSet<(usize, DocumentResult)>,
        index: usize,
        document: DocumentRef,
    ) {
        let source = Arc::clone(&self.source);
        let extractor = Arc::clone(&self.extractor);
        let timeout = self.config.document_timeout();

        tasks.spawn(async move {
            // Inner task so a panic is caught by its JoinHandle and still
            // attributed to this document
            let work = tokio::spawn(process_document(source, extractor, document, timeout));
            let result = match work.await {
                Ok(result) => result,
                Err(e) => DocumentResult::Failed(FailureReason::TaskFailed(e.to_string())),
            };
            (index, result)
        });
    }

    fn record(&mut self, document: &DocumentRef, result: &DocumentResult) {
        match result {
            DocumentResult::Succeeded { schedule, report } => {
                tracing::info!(
                    document = %document,
                    farm = %schedule.farm_code(),
                    barn = %schedule.barn_code(),
                    deliveries = schedule.total_deliveries(),
                    "Document processed"
                );
                self.metrics
                    .record_success(schedule.total_deliveries(), report.fallback_used);
            }
            DocumentResult::Failed(reason) => {
                tracing::warn!(document = %document, reason = %reason, "Document failed");
                self.metrics.record_failure(reason);
            }
        }
    }
}

async fn process_document(
    source: Arc<dyn DocumentSource>,
    extractor: Arc<ScheduleExtractor>,
    document: DocumentRef,
    timeout: Duration,
) -> DocumentResult {
    let text = match tokio::time::timeout(timeout, source.fetch_text(&document)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return DocumentResult::Failed(FailureReason::Source(e.to_string())),
        Err(_) => return DocumentResult::Failed(FailureReason::TimedOut(timeout.as_secs())),
    };

    let (schedule, report) = extractor.extract_with_report(&text);
    match classify(&schedule) {
        Ok(()) => DocumentResult::Succeeded { schedule, report },
        Err(reason) => DocumentResult::Failed(reason),
    }
}
