//! Farm and barn recovery

use crate::error::ExtractorError;
use feedline_domain::{BarnCode, FarmCode, Identified};
use regex::Regex;

/// Find the farm a document belongs to.
///
/// Farms are tried in priority order; the first farm with any search term
/// present anywhere in the text (case-insensitive) wins.
pub fn recover_farm(text: &str) -> Identified<FarmCode> {
    let upper = text.to_uppercase();
    FarmCode::ALL
        .into_iter()
        .find(|farm| farm.search_terms().iter().any(|term| upper.contains(term)))
        .into()
}

/// Barn label patterns, tried short form first
pub struct BarnPatterns {
    short_form: Regex,
    long_form: Regex,
}

impl BarnPatterns {
    /// Compile the barn patterns
    pub fn new() -> Result<Self, ExtractorError> {
        Ok(Self {
            short_form: Regex::new(r"(?i)B\s*([0-9]+)")?,
            long_form: Regex::new(r"(?i)BARN\s*([0-9]+)")?,
        })
    }

    /// Find the barn a document belongs to.
    ///
    /// The short form (`B2`, `B 2`) is searched first; the long form
    /// (`Barn 2`) only when no short form appears anywhere.
    pub fn recover(&self, text: &str) -> Identified<BarnCode> {
        [&self.short_form, &self.long_form]
            .into_iter()
            .find_map(|pattern| {
                pattern
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .and_then(|digits| BarnCode::from_digits(digits.as_str()))
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barn(text: &str) -> String {
        BarnPatterns::new().unwrap().recover(text).to_string()
    }

    #[test]
    fn test_farm_by_code() {
        assert_eq!(recover_farm("Schedule for VAS B2"), Identified::Known(FarmCode::Vas));
        assert_eq!(recover_farm("dfi barn 4"), Identified::Known(FarmCode::Dfi));
    }

    #[test]
    fn test_farm_by_alias() {
        assert_eq!(recover_farm("Apostolakos Poultry"), Identified::Known(FarmCode::Apo));
        assert_eq!(recover_farm("sigma farms ltd"), Identified::Known(FarmCode::Sig));
        assert_eq!(recover_farm("Edge Farms"), Identified::Known(FarmCode::Edg));
    }

    #[test]
    fn test_farm_priority_order() {
        // Both SIG and VAS appear; VAS has priority regardless of position
        assert_eq!(recover_farm("SIGMA then VAS"), Identified::Known(FarmCode::Vas));
    }

    #[test]
    fn test_farm_unknown() {
        assert_eq!(recover_farm("Nothing to see here 12/15/2024"), Identified::Unknown);
        assert_eq!(recover_farm(""), Identified::Unknown);
    }

    #[test]
    fn test_barn_short_form() {
        assert_eq!(barn("VAS B2 schedule"), "B2");
        assert_eq!(barn("vas b 7"), "B7");
        assert_eq!(barn("House B01"), "B01");
    }

    #[test]
    fn test_barn_long_form() {
        assert_eq!(barn("Farm Edge, Barn 3"), "B3");
        assert_eq!(barn("barn12"), "B12");
    }

    #[test]
    fn test_barn_short_form_takes_precedence() {
        // Long form appears first, but a short form exists later
        assert_eq!(barn("Barn 3 ... B4"), "B4");
    }

    #[test]
    fn test_barn_needs_ascii_digits() {
        assert_eq!(barn("VAS B\u{0663} house, label B2"), "B2");
        assert_eq!(barn("Barn \u{0664}"), "Unknown");
    }

    #[test]
    fn test_barn_unknown() {
        assert_eq!(barn("no label here"), "Unknown");
    }
}
