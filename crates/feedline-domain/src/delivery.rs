//! Delivery records - one promised feed delivery

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest accepted delivery weight (inclusive)
pub const MIN_DELIVERY_WEIGHT: f64 = 100.0;

/// Highest accepted delivery weight (inclusive)
pub const MAX_DELIVERY_WEIGHT: f64 = 50_000.0;

/// One promised delivery
///
/// Records are immutable once extracted. `source_text` keeps the exact
/// substring of the document that produced the record, for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    /// Delivery date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,

    /// Delivery weight in kilograms
    pub weight: f64,

    /// Matched text the record came from
    pub source_text: String,
}

impl DeliveryRecord {
    /// Create a new delivery record
    pub fn new(date: NaiveDate, weight: f64, source_text: impl Into<String>) -> Self {
        Self {
            date,
            weight,
            source_text: source_text.into(),
        }
    }
}
