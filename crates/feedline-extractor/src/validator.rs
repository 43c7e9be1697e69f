//! Candidate validation and normalization
//!
//! Every (date, weight) pair a strategy proposes passes through here before it
//! becomes a [`DeliveryRecord`]. Rejections are silent: free-form text is
//! expected to be noisy.

use crate::config::ExtractorConfig;
use crate::strategy::{Candidate, DateToken};
use chrono::NaiveDate;
use feedline_domain::delivery::{MAX_DELIVERY_WEIGHT, MIN_DELIVERY_WEIGHT};
use feedline_domain::schedule::normalize_deliveries;
use feedline_domain::DeliveryRecord;
use tracing::debug;

/// Parse a weight token, stripping thousands separators.
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_weight(token: &str) -> Option<f64> {
    let cleaned: String = token.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// True iff `token` is a number within the default delivery weight bounds
///
/// # Examples
///
/// ```
/// use feedline_extractor::is_valid_weight;
///
/// assert!(is_valid_weight("5,250"));
/// assert!(!is_valid_weight("50"));
/// assert!(!is_valid_weight("lots"));
/// ```
pub fn is_valid_weight(token: &str) -> bool {
    parse_weight(token)
        .is_some_and(|value| (MIN_DELIVERY_WEIGHT..=MAX_DELIVERY_WEIGHT).contains(&value))
}

/// Convert `MM/DD/YYYY` into a calendar date.
///
/// Impossible dates (`02/30/2024`, `99/99/9999`) yield `None` rather than
/// rolling over into the next month.
pub fn normalize_slash_date(token: &str) -> Option<NaiveDate> {
    let mut parts = token.trim().split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert a compact `Www Mmm-DD-YYYY` expression into a calendar date.
///
/// The weekday is not checked against the date.
pub fn normalize_labelled_date(token: &str) -> Option<NaiveDate> {
    let compact = token.split_whitespace().last()?;
    let mut parts = compact.split('-');
    let month = month_from_abbrev(parts.next()?)?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Keep the first record per date and order by date.
///
/// Returns the surviving records and how many duplicates were dropped.
pub fn dedup_and_sort(records: Vec<DeliveryRecord>) -> (Vec<DeliveryRecord>, usize) {
    let before = records.len();
    let kept = normalize_deliveries(records);
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Applies weight bounds and date normalization to candidates
#[derive(Debug, Clone)]
pub struct Validator {
    min_weight: f64,
    max_weight: f64,
}

impl Validator {
    /// Create a validator using the bounds from `config`
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            min_weight: config.min_weight,
            max_weight: config.max_weight,
        }
    }

    /// True iff `token` parses within the configured bounds
    pub fn is_valid_weight(&self, token: &str) -> bool {
        parse_weight(token)
            .is_some_and(|value| value >= self.min_weight && value <= self.max_weight)
    }

    /// Turn a candidate into a record, or drop it
    pub fn accept(&self, candidate: &Candidate) -> Option<DeliveryRecord> {
        if !self.is_valid_weight(&candidate.weight) {
            debug!(
                strategy = candidate.strategy,
                weight = %candidate.weight,
                "Rejected candidate: weight out of range"
            );
            return None;
        }

        let date = match &candidate.date {
            DateToken::Slash(token) => normalize_slash_date(token),
            DateToken::Labelled(token) => normalize_labelled_date(token),
        };
        let Some(date) = date else {
            debug!(
                strategy = candidate.strategy,
                date = %candidate.date,
                "Rejected candidate: unparsable date"
            );
            return None;
        };

        let weight = parse_weight(&candidate.weight)?;
        Some(DeliveryRecord::new(date, weight, candidate.source_text.clone()))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn candidate(date: DateToken, weight: &str) -> Candidate {
        Candidate {
            date,
            weight: weight.to_string(),
            source_text: "src".to_string(),
            strategy: "test",
        }
    }

    #[test]
    fn test_weight_bounds_are_inclusive() {
        assert!(is_valid_weight("100"));
        assert!(is_valid_weight("50000"));
        assert!(is_valid_weight("50,000"));
        assert!(!is_valid_weight("99.99"));
        assert!(!is_valid_weight("50000.01"));
    }

    #[test]
    fn test_weight_rejects_non_numeric() {
        assert!(!is_valid_weight(""));
        assert!(!is_valid_weight("abc"));
        assert!(!is_valid_weight("NaN"));
        assert!(!is_valid_weight("inf"));
    }

    #[test]
    fn test_parse_weight_strips_separators() {
        assert_eq!(parse_weight("5,250"), Some(5250.0));
        assert_eq!(parse_weight("1,234,567.5"), Some(1_234_567.5));
        assert_eq!(parse_weight(" 800 "), Some(800.0));
    }

    #[test]
    fn test_slash_date() {
        assert_eq!(normalize_slash_date("12/15/2024"), Some(ymd(2024, 12, 15)));
        assert_eq!(normalize_slash_date("1/5/2025"), Some(ymd(2025, 1, 5)));
        assert_eq!(normalize_slash_date("99/99/9999"), None);
        assert_eq!(normalize_slash_date("02/30/2024"), None);
        assert_eq!(normalize_slash_date("02/29/2024"), Some(ymd(2024, 2, 29)));
        assert_eq!(normalize_slash_date("12/15"), None);
    }

    #[test]
    fn test_labelled_date() {
        assert_eq!(normalize_labelled_date("Mon Jul-15-2025"), Some(ymd(2025, 7, 15)));
        assert_eq!(normalize_labelled_date("tue  SEP-2-2025"), Some(ymd(2025, 9, 2)));
        assert_eq!(normalize_labelled_date("Mon Xyz-15-2025"), None);
        assert_eq!(normalize_labelled_date("Mon Feb-31-2025"), None);
    }

    #[test]
    fn test_accept_builds_record() {
        let validator = Validator::default();
        let record = validator
            .accept(&candidate(DateToken::Slash("12/15/2024".into()), "5,250"))
            .unwrap();
        assert_eq!(record.date, ymd(2024, 12, 15));
        assert_eq!(record.weight, 5250.0);
        assert_eq!(record.source_text, "src");
    }

    #[test]
    fn test_accept_rejects_light_weight_next_to_good_date() {
        let validator = Validator::default();
        assert!(validator
            .accept(&candidate(DateToken::Slash("12/15/2024".into()), "50"))
            .is_none());
    }

    #[test]
    fn test_accept_rejects_bad_date() {
        let validator = Validator::default();
        assert!(validator
            .accept(&candidate(DateToken::Slash("13/45/2024".into()), "5000"))
            .is_none());
    }

    #[test]
    fn test_configured_bounds() {
        let config = ExtractorConfig {
            min_weight: 1000.0,
            max_weight: 2000.0,
            ..Default::default()
        };
        let validator = Validator::new(&config);
        assert!(validator.is_valid_weight("1,500"));
        assert!(!validator.is_valid_weight("500"));
    }

    #[test]
    fn test_dedup_and_sort_counts_drops() {
        let records = vec![
            DeliveryRecord::new(ymd(2024, 12, 20), 500.0, "a"),
            DeliveryRecord::new(ymd(2024, 12, 10), 600.0, "b"),
            DeliveryRecord::new(ymd(2024, 12, 20), 700.0, "c"),
        ];
        let (kept, dropped) = dedup_and_sort(records);
        assert_eq!(dropped, 1);
        assert_eq!(kept[0].source_text, "b");
        assert_eq!(kept[1].source_text, "a");
    }
}
