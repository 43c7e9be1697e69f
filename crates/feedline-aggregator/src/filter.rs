//! Farm, barn and day-window selection

use crate::AggregatorError;
use feedline_domain::{BarnCode, FarmCode, Identified, ScheduleDocument};
use std::fmt;
use std::str::FromStr;

/// Days ahead counted as "upcoming" unless told otherwise
pub const DEFAULT_DAY_WINDOW: u32 = 30;

/// Keyword selecting every value
pub const ALL_KEYWORD: &str = "all";

/// Either every value or exactly one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// No restriction
    All,

    /// Only this value
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// True when `value` is selected
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_KEYWORD),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

/// Parse `"all"` or a single value; `what` names the parameter in errors
fn parse_selection<T>(raw: &str, what: &str) -> Result<Selection<Identified<T>>, AggregatorError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(ALL_KEYWORD) {
        return Ok(Selection::All);
    }
    raw.parse::<Identified<T>>()
        .map(Selection::Only)
        .map_err(|e| AggregatorError::InvalidFilter(format!("{} '{}': {}", what, raw, e)))
}

/// Which documents to aggregate and how far ahead counts as upcoming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationFilter {
    /// Farm selection
    pub farm: Selection<Identified<FarmCode>>,

    /// Barn selection
    pub barn: Selection<Identified<BarnCode>>,

    /// Days ahead (inclusive) that count as upcoming
    pub day_window: u32,
}

impl Default for AggregationFilter {
    fn default() -> Self {
        Self {
            farm: Selection::All,
            barn: Selection::All,
            day_window: DEFAULT_DAY_WINDOW,
        }
    }
}

impl AggregationFilter {
    /// Build a filter from user-facing parameters
    ///
    /// `farm` and `barn` accept `"all"` (any case), a code such as `"VAS"`
    /// or `"B2"`, or `"Unknown"`. The window must not be negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use feedline_aggregator::{AggregationFilter, Selection};
    ///
    /// let filter = AggregationFilter::parse("vas", "all", 14).unwrap();
    /// assert!(matches!(filter.barn, Selection::All));
    /// assert_eq!(filter.day_window, 14);
    ///
    /// assert!(AggregationFilter::parse("XYZ", "all", 14).is_err());
    /// assert!(AggregationFilter::parse("all", "all", -1).is_err());
    /// ```
    pub fn parse(farm: &str, barn: &str, day_window: i64) -> Result<Self, AggregatorError> {
        let day_window = u32::try_from(day_window).map_err(|_| {
            AggregatorError::InvalidFilter(format!(
                "day window must be between 0 and {}, got {}",
                u32::MAX,
                day_window
            ))
        })?;

        Ok(Self {
            farm: parse_selection::<FarmCode>(farm, "farm")?,
            barn: parse_selection::<BarnCode>(barn, "barn")?,
            day_window,
        })
    }

    /// True when `document` falls inside the farm and barn selection
    pub fn matches(&self, document: &ScheduleDocument) -> bool {
        self.farm.matches(document.farm_code()) && self.barn.matches(document.barn_code())
    }

    /// True when a delivery `days_until` days away counts as upcoming
    pub fn is_upcoming(&self, days_until: i64) -> bool {
        days_until >= 0 && days_until <= i64::from(self.day_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(farm: Identified<FarmCode>, barn: &str) -> ScheduleDocument {
        ScheduleDocument::new(farm, barn.parse().unwrap(), vec![])
    }

    #[test]
    fn test_default_filter_selects_everything() {
        let filter = AggregationFilter::default();
        assert_eq!(filter.day_window, 30);
        assert!(filter.matches(&doc(Identified::Known(FarmCode::Vas), "B1")));
        assert!(filter.matches(&doc(Identified::Unknown, "Unknown")));
    }

    #[test]
    fn test_parse_codes() {
        let filter = AggregationFilter::parse(" EDG ", "b4", 7).unwrap();
        assert_eq!(filter.farm, Selection::Only(Identified::Known(FarmCode::Edg)));
        assert_eq!(filter.barn.to_string(), "B4");

        assert!(filter.matches(&doc(Identified::Known(FarmCode::Edg), "B4")));
        assert!(!filter.matches(&doc(Identified::Known(FarmCode::Edg), "B5")));
        assert!(!filter.matches(&doc(Identified::Known(FarmCode::Vas), "B4")));
    }

    #[test]
    fn test_parse_all_and_unknown() {
        let filter = AggregationFilter::parse("ALL", "unknown", 0).unwrap();
        assert_eq!(filter.farm, Selection::All);
        assert_eq!(filter.barn, Selection::Only(Identified::Unknown));
        assert!(filter.matches(&doc(Identified::Known(FarmCode::Dfi), "Unknown")));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            AggregationFilter::parse("FARM9", "all", 30),
            Err(AggregatorError::InvalidFilter(_))
        ));
        assert!(AggregationFilter::parse("all", "barn two", 30).is_err());
        assert!(AggregationFilter::parse("all", "all", -5).is_err());
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        let filter = AggregationFilter::parse("all", "all", 30).unwrap();
        assert!(filter.is_upcoming(0));
        assert!(filter.is_upcoming(30));
        assert!(!filter.is_upcoming(31));
        assert!(!filter.is_upcoming(-1));
    }
}
