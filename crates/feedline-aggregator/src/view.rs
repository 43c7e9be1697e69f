//! The dashboard view model

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one barn of one farm
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnSummary {
    /// Schedules for this barn
    pub schedule_count: usize,

    /// Deliveries across those schedules
    pub delivery_count: usize,

    /// Summed delivery weight
    pub total_weight: f64,

    /// Deliveries inside the day window
    pub upcoming_deliveries: usize,
}

impl BarnSummary {
    pub(crate) fn absorb(&mut self, other: BarnSummary) {
        self.schedule_count += other.schedule_count;
        self.delivery_count += other.delivery_count;
        self.total_weight += other.total_weight;
        self.upcoming_deliveries += other.upcoming_deliveries;
    }
}

/// Totals for one farm, with its barns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmSummary {
    /// Schedules for this farm
    pub schedule_count: usize,

    /// Deliveries across those schedules
    pub total_deliveries: usize,

    /// Summed delivery weight
    pub total_weight: f64,

    /// Deliveries inside the day window
    pub upcoming_deliveries: usize,

    /// Per-barn totals keyed by barn label
    pub barns: BTreeMap<String, BarnSummary>,
}

impl FarmSummary {
    pub(crate) fn absorb(&mut self, other: FarmSummary) {
        self.schedule_count += other.schedule_count;
        self.total_deliveries += other.total_deliveries;
        self.total_weight += other.total_weight;
        self.upcoming_deliveries += other.upcoming_deliveries;
        for (label, barn) in other.barns {
            self.barns.entry(label).or_default().absorb(barn);
        }
    }
}

/// One delivery placed on the calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Delivery date
    pub date: NaiveDate,

    /// Farm label
    pub farm: String,

    /// Barn label
    pub barn: String,

    /// Delivery weight
    pub weight: f64,

    /// Whole days from today; negative for past deliveries
    pub days_until: i64,

    /// `FARM-BARN`
    pub location: String,
}

/// Totals over the whole filtered set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    /// Schedules matching the filter
    pub total_schedules: usize,

    /// Deliveries in those schedules
    pub total_deliveries: usize,

    /// Summed delivery weight
    pub total_weight: f64,

    /// Distinct farms with at least one matching delivery
    pub active_farms: usize,
}

/// Rollup of many schedules for one filter
///
/// A view is computed fresh for every filter and never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationView {
    /// Per-farm totals keyed by farm label
    pub farms: BTreeMap<String, FarmSummary>,

    /// Every matching delivery, ascending by date
    pub timeline: Vec<TimelineEntry>,

    /// Overall totals
    pub summary: ViewSummary,

    /// Window the upcoming counters were computed with
    pub day_window: u32,
}

impl AggregationView {
    /// Timeline entries between today and the end of the day window
    pub fn upcoming(&self) -> Vec<&TimelineEntry> {
        let window = i64::from(self.day_window);
        self.timeline
            .iter()
            .filter(|entry| entry.days_until >= 0 && entry.days_until <= window)
            .collect()
    }

    /// Totals for one farm
    pub fn farm(&self, label: &str) -> Option<&FarmSummary> {
        self.farms.get(label)
    }

    /// True when nothing matched the filter
    pub fn is_empty(&self) -> bool {
        self.summary.total_schedules == 0
    }
}
