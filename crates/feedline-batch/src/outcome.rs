//! Per-document results and the batch partition

use crate::DocumentRef;
use feedline_domain::ScheduleDocument;
use feedline_extractor::ExtractionReport;
use thiserror::Error;

/// Why a document did not produce a usable schedule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// No farm code or alias appeared in the text
    #[error("Could not identify farm name")]
    UnknownFarm,

    /// No barn number appeared in the text
    #[error("Could not identify barn number")]
    UnknownBarn,

    /// Farm and barn were found but no delivery survived validation
    #[error("No delivery dates found")]
    NoDeliveries,

    /// The document source failed
    #[error("{0}")]
    Source(String),

    /// The document source did not answer in time
    #[error("Timed out after {0}s")]
    TimedOut(u64),

    /// The document's task panicked or was aborted
    #[error("Processing failed: {0}")]
    TaskFailed(String),
}

impl FailureReason {
    /// Short machine-friendly name of the reason
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::UnknownFarm => "unknown_farm",
            FailureReason::UnknownBarn => "unknown_barn",
            FailureReason::NoDeliveries => "no_deliveries",
            FailureReason::Source(_) => "source",
            FailureReason::TimedOut(_) => "timed_out",
            FailureReason::TaskFailed(_) => "task_failed",
        }
    }
}

/// Decide whether an extracted schedule is usable
///
/// Checks run in a fixed order and the first failing check wins: farm,
/// then barn, then deliveries.
pub fn classify(schedule: &ScheduleDocument) -> Result<(), FailureReason> {
    if !schedule.farm_code().is_known() {
        return Err(FailureReason::UnknownFarm);
    }
    if !schedule.barn_code().is_known() {
        return Err(FailureReason::UnknownBarn);
    }
    if schedule.deliveries().is_empty() {
        return Err(FailureReason::NoDeliveries);
    }
    Ok(())
}

/// A document that produced a usable schedule
#[derive(Debug, Clone)]
pub struct BatchSuccess {
    /// The input document
    pub document: DocumentRef,

    /// The extracted schedule
    pub schedule: ScheduleDocument,

    /// Strategy statistics for this document
    pub report: ExtractionReport,
}

/// A document that did not produce a usable schedule
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// The input document
    pub document: DocumentRef,

    /// Why it failed
    pub reason: FailureReason,
}

/// Result of a batch run
///
/// Every list keeps the order in which documents were submitted.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Documents that produced a usable schedule
    pub successful: Vec<BatchSuccess>,

    /// Documents that failed, with their reason
    pub failed: Vec<BatchFailure>,

    /// Documents never started because the batch was cancelled
    pub cancelled: Vec<DocumentRef>,

    /// Number of documents that were processed to an outcome
    pub total_processed: usize,
}

impl BatchOutcome {
    /// True when the batch was cut short
    pub fn was_cancelled(&self) -> bool {
        !self.cancelled.is_empty()
    }
}

/// Progress of a running batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Documents finished so far
    pub completed: usize,

    /// Documents in the batch
    pub total: usize,
}

impl BatchProgress {
    /// Completed share of the batch in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}
