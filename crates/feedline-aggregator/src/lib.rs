//! Feedline Aggregator
//!
//! Rolls many schedules up into the dashboard view: per-farm and per-barn
//! totals, a calendar timeline and overall counts.
//!
//! # Rules
//!
//! - Farm and barn selection decide which schedules take part at all.
//! - Totals cover every delivery of a selected schedule. Only the
//!   "upcoming" counters depend on the day window.
//! - A delivery is upcoming when `0 <= days_until <= day_window`.
//! - Past deliveries stay on the timeline.
//!
//! The engine is a pure fold. `today` is passed in, so the same inputs
//! always give the same view.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use feedline_aggregator::{aggregate, AggregationFilter};
//! use feedline_domain::ScheduleDocument;
//!
//! let schedules: Vec<ScheduleDocument> = Vec::new();
//! let filter = AggregationFilter::parse("VAS", "all", 30).unwrap();
//! let view = aggregate(&schedules, &filter, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//! assert_eq!(view.summary.total_schedules, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod error;
mod filter;
mod view;

pub use engine::{aggregate, PartialView};
pub use error::AggregatorError;
pub use filter::{AggregationFilter, Selection, ALL_KEYWORD, DEFAULT_DAY_WINDOW};
pub use view::{AggregationView, BarnSummary, FarmSummary, TimelineEntry, ViewSummary};
