//! Schedule documents - the structured result of processing one input document

use crate::{BarnCode, DeliveryRecord, FarmCode, Identified};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Unique identifier for an archived schedule based on UUIDv7
///
/// UUIDv7 keeps identifiers sortable by creation time, so archive listings
/// come out in upload order without a separate index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleId(u128);

impl ScheduleId {
    /// Generate a new UUIDv7-based ScheduleId
    ///
    /// # Examples
    ///
    /// ```
    /// use feedline_domain::ScheduleId;
    ///
    /// let id = ScheduleId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a ScheduleId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid schedule id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for ScheduleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_string(&raw).map_err(de::Error::custom)
    }
}

/// Drop later records that repeat an earlier date, then sort by date.
///
/// The sort is stable, so records keep their discovery order only where it
/// does not conflict with date order.
pub fn normalize_deliveries(records: Vec<DeliveryRecord>) -> Vec<DeliveryRecord> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut unique: Vec<DeliveryRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.date))
        .collect();
    unique.sort_by_key(|record| record.date);
    unique
}

/// The structured result of processing one document
///
/// Deliveries are unique by date and ascending. Totals are derived from the
/// delivery list and are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ScheduleDocumentRepr")]
pub struct ScheduleDocument {
    farm_code: Identified<FarmCode>,
    barn_code: Identified<BarnCode>,
    deliveries: Vec<DeliveryRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDocumentRepr {
    farm_code: Identified<FarmCode>,
    barn_code: Identified<BarnCode>,
    #[serde(default)]
    deliveries: Vec<DeliveryRecord>,
}

impl From<ScheduleDocumentRepr> for ScheduleDocument {
    fn from(repr: ScheduleDocumentRepr) -> Self {
        Self::new(repr.farm_code, repr.barn_code, repr.deliveries)
    }
}

impl ScheduleDocument {
    /// Create a schedule, enforcing the date uniqueness and ordering invariants
    pub fn new(
        farm_code: Identified<FarmCode>,
        barn_code: Identified<BarnCode>,
        deliveries: Vec<DeliveryRecord>,
    ) -> Self {
        Self {
            farm_code,
            barn_code,
            deliveries: normalize_deliveries(deliveries),
        }
    }

    /// Farm the schedule belongs to
    pub fn farm_code(&self) -> &Identified<FarmCode> {
        &self.farm_code
    }

    /// Barn the schedule belongs to
    pub fn barn_code(&self) -> &Identified<BarnCode> {
        &self.barn_code
    }

    /// Deliveries in ascending date order
    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    /// Replace the delivery list; invariants are re-applied
    pub fn with_deliveries(self, deliveries: Vec<DeliveryRecord>) -> Self {
        Self::new(self.farm_code, self.barn_code, deliveries)
    }

    /// Sum of all delivery weights
    pub fn total_weight(&self) -> f64 {
        self.deliveries.iter().map(|d| d.weight).sum()
    }

    /// Number of deliveries
    pub fn total_deliveries(&self) -> usize {
        self.deliveries.len()
    }

    /// Mean delivery weight, 0 for an empty schedule
    pub fn average_weight(&self) -> f64 {
        if self.deliveries.is_empty() {
            return 0.0;
        }
        self.total_weight() / self.deliveries.len() as f64
    }

    /// `FARM-BARN` label used in listings
    pub fn location(&self) -> String {
        format!("{}-{}", self.farm_code, self.barn_code)
    }
}

/// A schedule plus the metadata attached when it is archived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSchedule {
    /// Archive identifier
    pub id: ScheduleId,

    /// Reference to the document the schedule was extracted from
    pub document_ref: String,

    /// When the schedule entered the archive
    pub uploaded_at: DateTime<Utc>,

    /// The extracted schedule
    pub schedule: ScheduleDocument,
}

impl StoredSchedule {
    /// Wrap a schedule with a fresh id and the current time
    pub fn new(document_ref: impl Into<String>, schedule: ScheduleDocument) -> Self {
        Self {
            id: ScheduleId::new(),
            document_ref: document_ref.into(),
            uploaded_at: Utc::now(),
            schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vas_b1(deliveries: Vec<DeliveryRecord>) -> ScheduleDocument {
        ScheduleDocument::new(
            Identified::Known(FarmCode::Vas),
            Identified::Known(BarnCode::parse("B1").unwrap()),
            deliveries,
        )
    }

    #[test]
    fn test_new_dedups_first_wins_and_sorts() {
        let doc = vas_b1(vec![
            DeliveryRecord::new(date(2024, 12, 18), 4800.0, "second"),
            DeliveryRecord::new(date(2024, 12, 15), 5250.0, "first"),
            DeliveryRecord::new(date(2024, 12, 18), 9999.0, "duplicate"),
        ]);

        assert_eq!(doc.total_deliveries(), 2);
        assert_eq!(doc.deliveries()[0].date, date(2024, 12, 15));
        assert_eq!(doc.deliveries()[1].source_text, "second");
        assert_eq!(doc.total_weight(), 10050.0);
        assert_eq!(doc.average_weight(), 5025.0);
    }

    #[test]
    fn test_empty_schedule_totals() {
        let doc = vas_b1(Vec::new());
        assert_eq!(doc.total_weight(), 0.0);
        assert_eq!(doc.total_deliveries(), 0);
        assert_eq!(doc.average_weight(), 0.0);
    }

    #[test]
    fn test_with_deliveries_recomputes() {
        let doc = vas_b1(vec![DeliveryRecord::new(date(2024, 1, 1), 1000.0, "a")]);
        let doc = doc.with_deliveries(vec![
            DeliveryRecord::new(date(2024, 1, 3), 300.0, "c"),
            DeliveryRecord::new(date(2024, 1, 2), 200.0, "b"),
        ]);
        assert_eq!(doc.total_weight(), 500.0);
        assert_eq!(doc.deliveries()[0].source_text, "b");
    }

    #[test]
    fn test_wire_shape() {
        let doc = vas_b1(vec![DeliveryRecord::new(date(2024, 12, 15), 5250.0, "x")]);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["farmCode"], "VAS");
        assert_eq!(json["barnCode"], "B1");
        assert_eq!(json["deliveries"][0]["date"], "2024-12-15");
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let json = r#"{
            "farmCode": "EDG",
            "barnCode": "Unknown",
            "deliveries": [
                {"date": "2024-12-20", "weight": 500.0, "sourceText": "b"},
                {"date": "2024-12-10", "weight": 400.0, "sourceText": "a"},
                {"date": "2024-12-20", "weight": 900.0, "sourceText": "dup"}
            ]
        }"#;
        let doc: ScheduleDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.farm_code(), &Identified::Known(FarmCode::Edg));
        assert!(!doc.barn_code().is_known());
        assert_eq!(doc.total_deliveries(), 2);
        assert_eq!(doc.deliveries()[1].source_text, "b");
    }

    #[test]
    fn test_stored_schedule_round_trip() {
        let stored = StoredSchedule::new(
            "VAS_B1.txt",
            vas_b1(vec![DeliveryRecord::new(date(2024, 12, 15), 5250.0, "x")]),
        );
        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stored);
    }

    #[test]
    fn test_schedule_id_string_round_trip() {
        let id = ScheduleId::new();
        let parsed = ScheduleId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(ScheduleId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_location_label() {
        let doc = ScheduleDocument::new(Identified::Unknown, Identified::Unknown, Vec::new());
        assert_eq!(doc.location(), "Unknown-Unknown");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_record() -> impl Strategy<Value = DeliveryRecord> {
            (0i64..400, 100u32..50_000).prop_map(|(offset, weight)| {
                let day = date(2024, 1, 1) + chrono::Duration::days(offset);
                DeliveryRecord::new(day, weight as f64, format!("{}", offset))
            })
        }

        proptest! {
            /// Property: no two deliveries share a date
            #[test]
            fn test_dates_unique(records in prop::collection::vec(arb_record(), 0..40)) {
                let doc = vas_b1(records);
                let mut dates: Vec<_> = doc.deliveries().iter().map(|d| d.date).collect();
                let before = dates.len();
                dates.dedup();
                prop_assert_eq!(before, dates.len());
            }

            /// Property: deliveries ascend by date
            #[test]
            fn test_dates_ascending(records in prop::collection::vec(arb_record(), 0..40)) {
                let doc = vas_b1(records);
                for pair in doc.deliveries().windows(2) {
                    prop_assert!(pair[0].date <= pair[1].date);
                }
            }

            /// Property: the first record seen for a date is the one kept
            #[test]
            fn test_first_record_wins(records in prop::collection::vec(arb_record(), 1..40)) {
                let doc = vas_b1(records.clone());
                for kept in doc.deliveries() {
                    let first = records.iter().find(|r| r.date == kept.date).unwrap();
                    prop_assert_eq!(&first.source_text, &kept.source_text);
                }
            }
        }
    }
}
