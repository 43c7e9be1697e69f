//! Metrics collection for batch runs

use crate::FailureReason;
use std::collections::BTreeMap;

/// Metrics collected while processing batches
///
/// Tracks successes, failures per reason, deliveries extracted and how
/// often the fallback strategies were needed.
#[derive(Debug, Clone, Default)]
pub struct BatchMetrics {
    /// Documents that produced a usable schedule
    pub succeeded: usize,

    /// Failed documents per reason kind
    pub failed: BTreeMap<&'static str, usize>,

    /// Documents never started because of cancellation
    pub cancelled: usize,

    /// Delivery records across all successful documents
    pub deliveries_extracted: usize,

    /// Documents whose deliveries came from the fallback strategies
    pub fallback_used: usize,

    /// Batches completed
    pub batch_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u128,
}

impl BatchMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful document
    pub fn record_success(&mut self, deliveries: usize, fallback_used: bool) {
        self.succeeded += 1;
        self.deliveries_extracted += deliveries;
        if fallback_used {
            self.fallback_used += 1;
        }
    }

    /// Record a failed document
    pub fn record_failure(&mut self, reason: &FailureReason) {
        *self.failed.entry(reason.kind()).or_insert(0) += 1;
    }

    /// Record documents skipped by cancellation
    pub fn record_cancelled(&mut self, count: usize) {
        self.cancelled += count;
    }

    /// Record a finished batch
    pub fn record_batch(&mut self, runtime_ms: u128) {
        self.batch_count += 1;
        self.total_runtime_ms += runtime_ms;
    }

    /// Get total failures across all reasons
    pub fn total_failed(&self) -> usize {
        self.failed.values().sum()
    }

    /// Get total documents processed to an outcome
    pub fn total_processed(&self) -> usize {
        self.succeeded + self.total_failed()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Batch Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Batches: {}", self.batch_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Processed: {}", self.total_processed()),
            format!("Succeeded: {}", self.succeeded),
            format!("Deliveries extracted: {}", self.deliveries_extracted),
            format!("Fallback used: {}", self.fallback_used),
        ];

        if self.cancelled > 0 {
            lines.push(format!("Cancelled: {}", self.cancelled));
        }

        if !self.failed.is_empty() {
            lines.push(String::new());
            lines.push("Failures by reason:".to_string());
            for (kind, count) in &self.failed {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_failed()));
        }

        lines.join("\n")
    }
}
