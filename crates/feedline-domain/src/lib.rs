//! Feedline Domain Layer
//!
//! Core data model for feed delivery schedules. Everything downstream
//! (extraction, batch processing, aggregation, the CLI) speaks in these types.
//!
//! ## Key Concepts
//!
//! - **FarmCode**: one of the fixed set of supplier farm identifiers
//! - **BarnCode**: a barn label of the form `B<digits>`
//! - **Identified**: a value that was either recovered from a document or not
//! - **DeliveryRecord**: one promised (date, weight) delivery with its source text
//! - **ScheduleDocument**: the structured result of one processed document
//! - **StoredSchedule**: a schedule plus the metadata the archive attaches
//!
//! ## Invariants
//!
//! A `ScheduleDocument` never holds two deliveries on the same date and always
//! keeps its deliveries in ascending date order. Both hold after construction
//! and after deserialization.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod barn;
pub mod delivery;
pub mod farm;
pub mod identified;
pub mod schedule;

// Re-exports for convenience
pub use barn::BarnCode;
pub use delivery::DeliveryRecord;
pub use farm::FarmCode;
pub use identified::Identified;
pub use schedule::{ScheduleDocument, ScheduleId, StoredSchedule};
