//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::identity::{recover_farm, BarnPatterns};
use crate::strategy::{
    DeliveryStrategy, LabelledWeightStrategy, ProximityStrategy, SlashDateStrategy,
};
use crate::validator::{dedup_and_sort, Validator};
use feedline_domain::{DeliveryRecord, ScheduleDocument};
use std::collections::BTreeMap;
use tracing::debug;

/// What happened while extracting one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    /// Candidates proposed, per strategy name
    pub candidates: BTreeMap<&'static str, usize>,

    /// Candidates accepted by the validator, per strategy name
    pub accepted: BTreeMap<&'static str, usize>,

    /// Candidates the validator dropped
    pub rejected: usize,

    /// Accepted records dropped because an earlier record had the same date
    pub duplicates: usize,

    /// Whether the fallback strategies had to run
    pub fallback_used: bool,
}

impl ExtractionReport {
    fn record(&mut self, strategy: &'static str, proposed: usize, accepted: usize) {
        *self.candidates.entry(strategy).or_insert(0) += proposed;
        *self.accepted.entry(strategy).or_insert(0) += accepted;
        self.rejected += proposed - accepted;
    }
}

/// The Extractor turns a document's text into a [`ScheduleDocument`]
///
/// Delivery recovery is a two-stage cascade. The primary strategies always
/// run and their results are merged in order. The fallback strategies run
/// only when the primary stage produced no valid record.
pub struct ScheduleExtractor {
    config: ExtractorConfig,
    barns: BarnPatterns,
    primary: Vec<Box<dyn DeliveryStrategy>>,
    fallback: Vec<Box<dyn DeliveryStrategy>>,
    validator: Validator,
}

impl ScheduleExtractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;

        let primary: Vec<Box<dyn DeliveryStrategy>> = vec![
            Box::new(SlashDateStrategy::new()?),
            Box::new(LabelledWeightStrategy::new()?),
        ];
        let fallback: Vec<Box<dyn DeliveryStrategy>> =
            vec![Box::new(ProximityStrategy::new(&config)?)];

        Ok(Self {
            barns: BarnPatterns::new()?,
            validator: Validator::new(&config),
            primary,
            fallback,
            config,
        })
    }

    /// Create an Extractor with default configuration
    pub fn default_config() -> Result<Self, ExtractorError> {
        Self::new(ExtractorConfig::default())
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a schedule from text
    ///
    /// Never fails: missing farm or barn become `Unknown`, and text without
    /// recognizable deliveries yields an empty delivery list.
    pub fn extract(&self, text: &str) -> ScheduleDocument {
        self.extract_with_report(text).0
    }

    /// Extract a schedule and report how each strategy fared
    pub fn extract_with_report(&self, text: &str) -> (ScheduleDocument, ExtractionReport) {
        let mut report = ExtractionReport::default();

        let farm = recover_farm(text);
        let barn = self.barns.recover(text);

        let mut records = self.run_stage(&self.primary, text, &mut report);
        if records.is_empty() {
            debug!("No deliveries from primary strategies, trying fallback");
            report.fallback_used = true;
            records = self.run_stage(&self.fallback, text, &mut report);
        }

        let (deliveries, duplicates) = dedup_and_sort(records);
        report.duplicates = duplicates;

        debug!(
            farm = %farm,
            barn = %barn,
            deliveries = deliveries.len(),
            rejected = report.rejected,
            duplicates,
            "Extraction complete"
        );

        (ScheduleDocument::new(farm, barn, deliveries), report)
    }

    /// Run every strategy in a stage and validate its candidates
    fn run_stage(
        &self,
        stage: &[Box<dyn DeliveryStrategy>],
        text: &str,
        report: &mut ExtractionReport,
    ) -> Vec<DeliveryRecord> {
        let mut records = Vec::new();

        for strategy in stage {
            let candidates = strategy.candidates(text);
            let before = records.len();
            records.extend(candidates.iter().filter_map(|c| self.validator.accept(c)));
            let accepted = records.len() - before;

            debug!(
                strategy = strategy.name(),
                candidates = candidates.len(),
                accepted,
                "Strategy finished"
            );
            report.record(strategy.name(), candidates.len(), accepted);
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedline_domain::{FarmCode, Identified};

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            min_weight: 10.0,
            max_weight: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            ScheduleExtractor::new(config),
            Err(ExtractorError::Config(_))
        ));
    }

    #[test]
    fn test_empty_text() {
        let extractor = ScheduleExtractor::default_config().unwrap();
        let (doc, report) = extractor.extract_with_report("");

        assert_eq!(doc.farm_code(), &Identified::<FarmCode>::Unknown);
        assert!(!doc.barn_code().is_known());
        assert!(doc.deliveries().is_empty());
        assert!(report.fallback_used);
        assert_eq!(report.rejected, 0);
    }

    #[test]
    fn test_report_counts_rejections() {
        let extractor = ScheduleExtractor::default_config().unwrap();
        let (doc, report) =
            extractor.extract_with_report("VAS B1 12/15/2024 5,250 12/16/2024 50");

        assert_eq!(doc.total_deliveries(), 1);
        assert_eq!(report.candidates[SlashDateStrategy::NAME], 2);
        assert_eq!(report.accepted[SlashDateStrategy::NAME], 1);
        assert_eq!(report.rejected, 1);
        assert!(!report.fallback_used);
    }
}
