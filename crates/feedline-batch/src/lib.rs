//! Feedline Batch
//!
//! Drives the Extractor over many documents and partitions the results.
//!
//! # Overview
//!
//! The Batch Orchestrator is responsible for:
//! - **Acquisition**: awaiting one [`DocumentSource`] call per document
//! - **Extraction**: running the
//!   [`ScheduleExtractor`](feedline_extractor::ScheduleExtractor) on the text
//! - **Classification**: sorting each document into `successful` or `failed`
//! - **Progress**: reporting the completed fraction after every document
//!
//! # Classification
//!
//! A document fails on the first of these checks that does not pass:
//!
//! | Check | Reason |
//! |-------|--------|
//! | Farm identified | "Could not identify farm name" |
//! | Barn identified | "Could not identify barn number" |
//! | At least one delivery | "No delivery dates found" |
//!
//! Source errors, timeouts and panics are failures of that document only.
//! Nothing is retried.
//!
//! # Concurrency
//!
//! Documents run as independent tasks, at most
//! [`BatchConfig::concurrency`] at a time. The outcome lists documents in
//! submission order, so the partition is the same for every concurrency
//! degree.
//!
//! # Usage
//!
//! ```no_run
//! use feedline_batch::{BatchConfig, BatchOrchestrator, DocumentRef, TextFileSource};
//! use feedline_extractor::ScheduleExtractor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut orchestrator = BatchOrchestrator::new(
//!         BatchConfig::default(),
//!         ScheduleExtractor::default_config()?,
//!         Arc::new(TextFileSource::with_root("schedules")),
//!     )?;
//!
//!     let documents = vec![DocumentRef::new("vas-b2.txt"), DocumentRef::new("edg-b1.txt")];
//!     let outcome = orchestrator
//!         .run(documents, |p| println!("{:.0}%", p.fraction() * 100.0))
//!         .await?;
//!
//!     println!("{}", orchestrator.metrics().summary());
//!     println!("{} of {} succeeded", outcome.successful.len(), outcome.total_processed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod metrics;
mod orchestrator;
mod outcome;
mod source;

pub use config::BatchConfig;
pub use error::{BatchError, SourceError};
pub use metrics::BatchMetrics;
pub use orchestrator::BatchOrchestrator;
pub use outcome::{
    classify, BatchFailure, BatchOutcome, BatchProgress, BatchSuccess, FailureReason,
};
pub use source::{DocumentRef, DocumentSource, InMemorySource, TextFileSource};
