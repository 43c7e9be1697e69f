//! Delivery recovery strategies
//!
//! Each strategy is a pure scan over the document text that proposes
//! (date, weight) candidates. Strategies do not validate; the
//! [`Validator`](crate::validator::Validator) decides what survives.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// A date expression as found in the text, tagged by its layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// `MM/DD/YYYY`
    Slash(String),

    /// `Www Mmm-DD-YYYY`
    Labelled(String),
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateToken::Slash(token) | DateToken::Labelled(token) => f.write_str(token),
        }
    }
}

/// An unvalidated (date, weight) pair proposed by a strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Raw date expression
    pub date: DateToken,

    /// Raw weight token, possibly with thousands separators
    pub weight: String,

    /// Exact text the pair was read from
    pub source_text: String,

    /// Name of the strategy that produced the candidate
    pub strategy: &'static str,
}

/// A text scan that proposes delivery candidates
pub trait DeliveryStrategy: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Scan `text` and return candidates in document order
    fn candidates(&self, text: &str) -> Vec<Candidate>;
}

// ASCII digits only; `\d` would also match other scripts' digits
const SLASH_DATE: &str = r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}";
const NUMBER: &str = r"[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?";

/// `MM/DD/YYYY` immediately followed by a weight
pub struct SlashDateStrategy {
    pattern: Regex,
}

impl SlashDateStrategy {
    /// Strategy name
    pub const NAME: &'static str = "slash-date";

    /// Compile the strategy pattern
    pub fn new() -> Result<Self, ExtractorError> {
        let pattern = Regex::new(&format!(r"({SLASH_DATE})\s+({NUMBER})"))?;
        Ok(Self { pattern })
    }
}

impl DeliveryStrategy for SlashDateStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        self.pattern
            .captures_iter(text)
            .map(|caps| Candidate {
                date: DateToken::Slash(caps[1].to_string()),
                weight: caps[2].to_string(),
                source_text: caps[0].to_string(),
                strategy: Self::NAME,
            })
            .collect()
    }
}

/// A weight, the `HD` marker, then later a `Www Mmm-DD-YYYY` date
pub struct LabelledWeightStrategy {
    pattern: Regex,
}

impl LabelledWeightStrategy {
    /// Strategy name
    pub const NAME: &'static str = "labelled-weight";

    /// Marker token that follows the weight
    pub const MARKER: &'static str = "HD";

    /// Compile the strategy pattern
    pub fn new() -> Result<Self, ExtractorError> {
        let pattern = Regex::new(&format!(
            r"(?i)({NUMBER})\s+{marker}\s+[^\n]*?(\w{{3}}\s+\w{{3}}-[0-9]{{1,2}}-[0-9]{{4}})",
            marker = Self::MARKER
        ))?;
        Ok(Self { pattern })
    }
}

impl DeliveryStrategy for LabelledWeightStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        self.pattern
            .captures_iter(text)
            .map(|caps| Candidate {
                date: DateToken::Labelled(caps[2].to_string()),
                weight: caps[1].to_string(),
                source_text: caps[0].to_string(),
                strategy: Self::NAME,
            })
            .collect()
    }
}

/// Every slash date paired with the first sizeable number near it
pub struct ProximityStrategy {
    date_pattern: Regex,
    number_pattern: Regex,
    before_chars: usize,
    after_chars: usize,
}

impl ProximityStrategy {
    /// Strategy name
    pub const NAME: &'static str = "proximity";

    /// Compile the strategy patterns using the window sizes from `config`
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Ok(Self {
            date_pattern: Regex::new(SLASH_DATE)?,
            number_pattern: Regex::new(r"[0-9]{1,3}(?:,[0-9]{3})+|[0-9]{3,}")?,
            before_chars: config.window_before_chars,
            after_chars: config.window_after_chars,
        })
    }

    /// First number of at least three digits in `text[window]` that does not
    /// overlap any of `dates`, as a range into `text`
    fn first_weight(
        &self,
        text: &str,
        window: Range<usize>,
        dates: &[Range<usize>],
    ) -> Option<Range<usize>> {
        let offset = window.start;
        self.number_pattern
            .find_iter(&text[window])
            .map(|m| offset + m.start()..offset + m.end())
            .find(|number| {
                !dates
                    .iter()
                    .any(|date| number.start < date.end && date.start < number.end)
            })
    }
}

impl DeliveryStrategy for ProximityStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        // Date tokens cut by a window edge must still not be read as weights
        let dates: Vec<Range<usize>> = self
            .date_pattern
            .find_iter(text)
            .map(|m| m.range())
            .collect();

        for date in self.date_pattern.find_iter(text) {
            let start = chars_back(text, date.start(), self.before_chars);
            let end = chars_forward(text, date.start(), self.after_chars);

            let Some(number) = self.first_weight(text, start..end, &dates) else {
                continue;
            };
            let (weight_start, weight_end) = (number.start, number.end);

            let span_start = date.start().min(weight_start);
            let span_end = date.end().max(weight_end);

            candidates.push(Candidate {
                date: DateToken::Slash(date.as_str().to_string()),
                weight: text[weight_start..weight_end].to_string(),
                source_text: text[span_start..span_end].to_string(),
                strategy: Self::NAME,
            });
        }

        candidates
    }
}

/// Byte offset `n` characters before `idx`, clamped to the start of `text`
fn chars_back(text: &str, idx: usize, n: usize) -> usize {
    if n == 0 {
        return idx;
    }
    text[..idx]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` characters after `idx`, clamped to the end of `text`
fn chars_forward(text: &str, idx: usize, n: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| idx + i)
        .unwrap_or(text.len())
}
