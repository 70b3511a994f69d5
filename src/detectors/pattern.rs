//! Regex-driven entity recognizers.
//!
//! A [`PatternRecognizer`] owns one entity type, one or more compiled
//! patterns, and a fixed score. Every regex match becomes a candidate span
//! with that score. Recognizers never read non-matching context, and
//! matches from one recognizer never overlap each other.
//!
//! The street recognizer is special: its pattern references the
//! `<LOCATION>` placeholder emitted by a previous redaction pass, so it is
//! only meaningful on already-redacted text (see [`PatternRecognizer::street`]).

use crate::{Detector, EntitySpan, EntityType, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// Fixed patterns, compiled once. Postcode/code/street/date come from the
// original German anonymizer configuration; the rest cover the structured
// types its generic pass expected from built-in recognizers.
static POSTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5}").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5}\d+").unwrap());
static STREET: Lazy<Regex> = Lazy::new(|| Regex::new(r"<LOCATION>.?\s*\d{1,4}").unwrap());
static DATE_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}/\d{4}").unwrap());
static DATE_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}\.\d{4}").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?:https?://|www\.)[^\s<>"]+"#).unwrap());
// Minimum length keeps abbreviated dates like 05/2021 out of reach.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+49|0049|0)[0-9 \-/()]{6,}\d").unwrap());
static IBAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b").unwrap());
static DATE_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}\.\s?\d{1,2}\.\s?\d{2,4}\b").unwrap());
static DATE_WRITTEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:\d{1,2}\.\s)?(?:Januar|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)(?:\s\d{4})?\b",
    )
    .unwrap()
});

/// Regex-based entity detector with a fixed confidence score.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    name: String,
    entity_type: EntityType,
    patterns: Vec<Regex>,
    score: f64,
}

impl PatternRecognizer {
    /// Create a recognizer from raw pattern strings.
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if any pattern
    /// fails to compile.
    pub fn new(
        name: impl Into<String>,
        entity_type: EntityType,
        patterns: &[&str],
        score: f64,
    ) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            entity_type,
            patterns,
            score: score.clamp(0.0, 1.0),
        })
    }

    fn from_compiled(name: &str, entity_type: EntityType, patterns: Vec<Regex>, score: f64) -> Self {
        Self {
            name: name.to_string(),
            entity_type,
            patterns,
            score,
        }
    }

    /// Five-digit German postal codes (`\d{5}`).
    #[must_use]
    pub fn postcode() -> Self {
        Self::from_compiled("postcode", EntityType::Postcode, vec![POSTCODE.clone()], 0.5)
    }

    /// Long numeric codes: six or more consecutive digits.
    #[must_use]
    pub fn long_code() -> Self {
        Self::from_compiled("code", EntityType::Code, vec![CODE.clone()], 0.5)
    }

    /// Abbreviated dates such as `03/2021` or `03.2021`.
    #[must_use]
    pub fn abbreviated_date() -> Self {
        Self::from_compiled(
            "date-abbrev",
            EntityType::Date,
            vec![DATE_SLASH.clone(), DATE_DOT.clone()],
            0.5,
        )
    }

    /// Composite street recognizer: the `<LOCATION>` placeholder, an
    /// optional separator character, and a house number of one to four
    /// digits.
    ///
    /// Valid only on text a location pass has already redacted; on raw
    /// input the pattern cannot match anything.
    #[must_use]
    pub fn street() -> Self {
        Self::from_compiled("street", EntityType::Street, vec![STREET.clone()], 0.5)
    }

    /// Email addresses.
    #[must_use]
    pub fn email() -> Self {
        Self::from_compiled("email", EntityType::EmailAddress, vec![EMAIL.clone()], 0.85)
    }

    /// Web addresses (`http://`, `https://`, `www.`).
    #[must_use]
    pub fn url() -> Self {
        Self::from_compiled("url", EntityType::Url, vec![URL.clone()], 0.6)
    }

    /// German phone numbers (`+49`, `0049`, or `0` prefixed).
    #[must_use]
    pub fn phone() -> Self {
        Self::from_compiled("phone", EntityType::PhoneNumber, vec![PHONE.clone()], 0.6)
    }

    /// IBAN account numbers.
    #[must_use]
    pub fn iban() -> Self {
        Self::from_compiled("iban", EntityType::IbanCode, vec![IBAN.clone()], 0.85)
    }

    /// Full dates: numeric (`24.12.2021`) and written German
    /// (`24. Dezember 2021`, `Dezember 2021`).
    #[must_use]
    pub fn date_time() -> Self {
        Self::from_compiled(
            "date-time",
            EntityType::DateTime,
            vec![DATE_NUMERIC.clone(), DATE_WRITTEN.clone()],
            0.6,
        )
    }

    /// The fixed score every match is emitted with.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The entity type this recognizer produces.
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }
}

/// Check whether a range overlaps any already-collected span.
fn overlaps_any(spans: &[EntitySpan], start: usize, end: usize) -> bool {
    spans.iter().any(|s| !(end <= s.start || start >= s.end))
}

impl Detector for PatternRecognizer {
    fn detect(
        &self,
        text: &str,
        entity_types: &[EntityType],
        score_threshold: f64,
    ) -> Result<Vec<EntitySpan>> {
        if !entity_types.contains(&self.entity_type) || self.score < score_threshold {
            return Ok(Vec::new());
        }

        let mut spans = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.find_iter(text) {
                if !overlaps_any(&spans, m.start(), m.end()) {
                    spans.push(EntitySpan::new(
                        m.as_str(),
                        self.entity_type,
                        m.start(),
                        m.end(),
                        self.score,
                        &self.name,
                    ));
                }
            }
        }
        Ok(spans)
    }

    fn supported_types(&self) -> Vec<EntityType> {
        vec![self.entity_type]
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "regex recognizer with fixed score"
    }
}
