//! Feedline Extractor
//!
//! Recovers structured delivery schedules from the extracted text of supplier
//! documents.
//!
//! # Overview
//!
//! Supplier documents have no fixed layout. The same farm, barn, date or
//! weight can appear in several textual shapes, with duplicates and noise.
//! The Extractor recovers what it can and degrades to `Unknown` codes and an
//! empty delivery list for everything else; deciding whether that is a
//! failure is left to the caller.
//!
//! # Architecture
//!
//! ```text
//! Text → farm/barn recovery ─┐
//!      → primary strategies  ├→ Validator → dedup + sort → ScheduleDocument
//!      → (fallback strategy) ┘
//! ```
//!
//! - **slash-date**: `MM/DD/YYYY` followed by a weight
//! - **labelled-weight**: a weight, the `HD` marker, then a `Www Mmm-DD-YYYY` date
//! - **proximity** (fallback): each slash date with the first sizeable number
//!   near it, used only when the first two found nothing valid
//!
//! # Example Usage
//!
//! ```
//! use feedline_extractor::ScheduleExtractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = ScheduleExtractor::default_config()?;
//! let schedule = extractor.extract("VAS B2 12/15/2024 5,250 KG");
//!
//! assert_eq!(schedule.farm_code().to_string(), "VAS");
//! assert_eq!(schedule.barn_code().to_string(), "B2");
//! assert_eq!(schedule.total_deliveries(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod identity;
pub mod strategy;
pub mod validator;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{ExtractionReport, ScheduleExtractor};
pub use identity::{recover_farm, BarnPatterns};
pub use strategy::{Candidate, DateToken, DeliveryStrategy};
pub use validator::{is_valid_weight, Validator};
