//! Fold schedules into an [`AggregationView`]

use crate::filter::AggregationFilter;
use crate::view::{AggregationView, BarnSummary, FarmSummary, TimelineEntry, ViewSummary};
use chrono::NaiveDate;
use feedline_domain::ScheduleDocument;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Aggregation state over some subset of schedules
///
/// Partials are built per document and combined with [`merge`]. Merging
/// partials of consecutive slices gives the same view as one pass over
/// the whole input.
///
/// [`merge`]: PartialView::merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialView {
    farms: BTreeMap<String, FarmSummary>,
    timeline: Vec<TimelineEntry>,
    active_farms: BTreeSet<String>,
    total_schedules: usize,
    total_deliveries: usize,
    total_weight: f64,
}

impl PartialView {
    /// Contribution of one schedule, empty if the filter excludes it
    pub fn from_document(
        document: &ScheduleDocument,
        filter: &AggregationFilter,
        today: NaiveDate,
    ) -> Self {
        if !filter.matches(document) {
            return Self::default();
        }

        let farm_label = document.farm_code().to_string();
        let barn_label = document.barn_code().to_string();
        let location = document.location();

        let mut barn = BarnSummary {
            schedule_count: 1,
            ..Default::default()
        };
        let mut timeline = Vec::with_capacity(document.total_deliveries());

        for delivery in document.deliveries() {
            let days_until = (delivery.date - today).num_days();

            barn.delivery_count += 1;
            barn.total_weight += delivery.weight;
            if filter.is_upcoming(days_until) {
                barn.upcoming_deliveries += 1;
            }

            timeline.push(TimelineEntry {
                date: delivery.date,
                farm: farm_label.clone(),
                barn: barn_label.clone(),
                weight: delivery.weight,
                days_until,
                location: location.clone(),
            });
        }

        let mut active_farms = BTreeSet::new();
        if barn.delivery_count > 0 {
            active_farms.insert(farm_label.clone());
        }

        let total_deliveries = barn.delivery_count;
        let total_weight = barn.total_weight;
        let farm = FarmSummary {
            schedule_count: 1,
            total_deliveries,
            total_weight,
            upcoming_deliveries: barn.upcoming_deliveries,
            barns: BTreeMap::from([(barn_label, barn)]),
        };

        Self {
            farms: BTreeMap::from([(farm_label, farm)]),
            timeline,
            active_farms,
            total_schedules: 1,
            total_deliveries,
            total_weight,
        }
    }

    /// Combine with the partial of the documents that follow this one
    pub fn merge(mut self, other: PartialView) -> Self {
        for (label, farm) in other.farms {
            self.farms.entry(label).or_default().absorb(farm);
        }
        self.timeline.extend(other.timeline);
        self.active_farms.extend(other.active_farms);
        self.total_schedules += other.total_schedules;
        self.total_deliveries += other.total_deliveries;
        self.total_weight += other.total_weight;
        self
    }

    /// Sort the timeline and produce the final view
    pub fn finish(mut self, day_window: u32) -> AggregationView {
        // Stable, so full ties keep input order
        self.timeline.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.farm.cmp(&b.farm))
                .then_with(|| a.barn.cmp(&b.barn))
        });

        AggregationView {
            summary: ViewSummary {
                total_schedules: self.total_schedules,
                total_deliveries: self.total_deliveries,
                total_weight: self.total_weight,
                active_farms: self.active_farms.len(),
            },
            farms: self.farms,
            timeline: self.timeline,
            day_window,
        }
    }
}

/// Build the view for `filter` over `documents` as seen on `today`
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use feedline_aggregator::{aggregate, AggregationFilter};
/// use feedline_domain::{BarnCode, DeliveryRecord, FarmCode, Identified, ScheduleDocument};
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let doc = ScheduleDocument::new(
///     Identified::Known(FarmCode::Vas),
///     Identified::Known(BarnCode::from_digits("1").unwrap()),
///     vec![DeliveryRecord::new(
///         NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
///         5000.0,
///         "3/4/2025 5000",
///     )],
/// );
///
/// let view = aggregate(&[doc], &AggregationFilter::default(), today);
/// assert_eq!(view.summary.active_farms, 1);
/// assert_eq!(view.timeline[0].days_until, 3);
/// assert_eq!(view.upcoming().len(), 1);
/// ```
pub fn aggregate<'a, I>(
    documents: I,
    filter: &AggregationFilter,
    today: NaiveDate,
) -> AggregationView
where
    I: IntoIterator<Item = &'a ScheduleDocument>,
{
    let view = documents
        .into_iter()
        .map(|document| PartialView::from_document(document, filter, today))
        .fold(PartialView::default(), PartialView::merge)
        .finish(filter.day_window);

    debug!(
        farm = %filter.farm,
        barn = %filter.barn,
        day_window = filter.day_window,
        schedules = view.summary.total_schedules,
        deliveries = view.summary.total_deliveries,
        "Aggregation complete"
    );

    view
}
