//! Values that may or may not have been recovered from a document

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Label used on the wire for values that could not be recovered
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A value recovered from a document, or the marker that recovery failed
///
/// On the wire this is the plain string form of the value (`"VAS"`, `"B2"`)
/// or `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identified<T> {
    /// The value was found in the document
    Known(T),

    /// Nothing identifiable was found
    Unknown,
}

impl<T> Identified<T> {
    /// True when the value was recovered
    pub fn is_known(&self) -> bool {
        matches!(self, Identified::Known(_))
    }

    /// Borrow the recovered value, if any
    pub fn known(&self) -> Option<&T> {
        match self {
            Identified::Known(value) => Some(value),
            Identified::Unknown => None,
        }
    }

    /// Convert into an `Option`
    pub fn into_option(self) -> Option<T> {
        match self {
            Identified::Known(value) => Some(value),
            Identified::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Identified<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Identified::Known(v),
            None => Identified::Unknown,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Identified<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identified::Known(value) => value.fmt(f),
            Identified::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

impl<T> FromStr for Identified<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(UNKNOWN_LABEL) {
            return Ok(Identified::Unknown);
        }
        s.parse::<T>()
            .map(Identified::Known)
            .map_err(|e| e.to_string())
    }
}

impl<T: fmt::Display> Serialize for Identified<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Identified<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BarnCode, FarmCode};

    #[test]
    fn test_display_uses_unknown_label() {
        let farm: Identified<FarmCode> = Identified::Unknown;
        assert_eq!(farm.to_string(), "Unknown");
        assert_eq!(Identified::Known(FarmCode::Sig).to_string(), "SIG");
    }

    #[test]
    fn test_serde_string_form() {
        let barn = Identified::Known(BarnCode::parse("B2").unwrap());
        assert_eq!(serde_json::to_string(&barn).unwrap(), "\"B2\"");

        let back: Identified<BarnCode> = serde_json::from_str("\"B2\"").unwrap();
        assert_eq!(back, barn);

        let unknown: Identified<FarmCode> = serde_json::from_str("\"Unknown\"").unwrap();
        assert!(!unknown.is_known());
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<Identified<FarmCode>, _> = serde_json::from_str("\"NOPE\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_option() {
        let id: Identified<FarmCode> = Some(FarmCode::Apo).into();
        assert_eq!(id.known(), Some(&FarmCode::Apo));
        let none: Identified<FarmCode> = None.into();
        assert_eq!(none.into_option(), None);
    }
}
