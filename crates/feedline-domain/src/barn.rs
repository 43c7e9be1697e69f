//! Barn labels of the form `B<digits>`

use std::fmt;

/// Barn identifier
///
/// Holds the digits exactly as written in the source document, so `B01` and
/// `B1` are distinct labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BarnCode(String);

impl BarnCode {
    /// Build a barn code from its digit part
    ///
    /// Returns `None` if `digits` is empty or contains anything but ASCII digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use feedline_domain::BarnCode;
    ///
    /// let barn = BarnCode::from_digits("2").unwrap();
    /// assert_eq!(barn.to_string(), "B2");
    /// assert!(BarnCode::from_digits("2a").is_none());
    /// ```
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(digits.to_string()))
    }

    /// The digit part of the label
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Parse a stored label such as `B3` (case-insensitive prefix)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let rest = s.strip_prefix('B').or_else(|| s.strip_prefix('b'))?;
        Self::from_digits(rest)
    }
}

impl fmt::Display for BarnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

impl std::str::FromStr for BarnCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid barn label: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label() {
        assert_eq!(BarnCode::parse("B3").unwrap().digits(), "3");
        assert_eq!(BarnCode::parse("b12").unwrap().to_string(), "B12");
        assert_eq!(BarnCode::parse("B01").unwrap().to_string(), "B01");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(BarnCode::parse("B").is_none());
        assert!(BarnCode::parse("3").is_none());
        assert!(BarnCode::parse("Barn 3").is_none());
        assert!(BarnCode::parse("B 3").is_none());
    }
}
