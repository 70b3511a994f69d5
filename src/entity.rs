//! Entity types and span structures.

use serde::{Deserialize, Serialize};

/// PII entity type classification.
///
/// Covers the entity types the German redaction pipeline knows how to
/// replace. Each type has a fixed placeholder token that is substituted
/// for detected spans (see [`EntityType::placeholder`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Person name
    Person,
    /// Location/Place
    Location,
    /// Organization name
    Organization,
    /// Full date or time expression
    DateTime,
    /// Abbreviated date (e.g. `03/2021`, `03.2021`)
    Date,
    /// Nationality, religious or political group
    Nrp,
    /// Phone number
    PhoneNumber,
    /// Email address
    EmailAddress,
    /// Web address
    Url,
    /// IBAN bank account number
    IbanCode,
    /// Long numeric code (six or more digits: customer, insurance, case numbers)
    Code,
    /// Five-digit German postal code
    Postcode,
    /// Street address: a redacted location followed by a house number.
    /// Composite: only detectable on text where locations are already
    /// placeholders.
    Street,
}

impl EntityType {
    /// All entity types, in the order the German pipeline cares about them.
    pub const ALL: [EntityType; 13] = [
        EntityType::Person,
        EntityType::Location,
        EntityType::Organization,
        EntityType::DateTime,
        EntityType::Date,
        EntityType::Nrp,
        EntityType::PhoneNumber,
        EntityType::EmailAddress,
        EntityType::Url,
        EntityType::IbanCode,
        EntityType::Code,
        EntityType::Postcode,
        EntityType::Street,
    ];

    /// Convert to the canonical label string.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Location => "LOCATION",
            EntityType::Organization => "ORGANIZATION",
            EntityType::DateTime => "DATE_TIME",
            EntityType::Date => "DATE",
            EntityType::Nrp => "NRP",
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::EmailAddress => "EMAIL_ADDRESS",
            EntityType::Url => "URL",
            EntityType::IbanCode => "IBAN_CODE",
            EntityType::Code => "CODE",
            EntityType::Postcode => "POSTCODE",
            EntityType::Street => "STREET",
        }
    }

    /// The placeholder token substituted for redacted spans of this type.
    ///
    /// Placeholder tokens are stable literals. No built-in detector matches
    /// them except the deliberately composite ones (see
    /// [`PatternRecognizer::street`](crate::PatternRecognizer::street)).
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        match self {
            EntityType::Person => "<PERSON>",
            EntityType::Location => "<LOCATION>",
            EntityType::Organization => "<ORGANIZATION>",
            EntityType::DateTime => "<DATE_TIME>",
            EntityType::Date => "<DATE>",
            EntityType::Nrp => "<NRP>",
            EntityType::PhoneNumber => "<PHONE_NUMBER>",
            EntityType::EmailAddress => "<EMAIL_ADDRESS>",
            EntityType::Url => "<URL>",
            EntityType::IbanCode => "<IBAN_CODE>",
            EntityType::Code => "<CODE>",
            EntityType::Postcode => "<POSTCODE>",
            EntityType::Street => "<STREET>",
        }
    }

    /// Parse from a label string. Returns `None` for unknown labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A candidate PII span produced by a detector over one document snapshot.
///
/// Offsets are byte offsets into the snapshot the detector was called with,
/// always on UTF-8 character boundaries. Spans become invalid as soon as
/// that snapshot is redacted; later passes must re-detect on the new text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Surface form of the detected span.
    pub text: String,
    /// Entity type classification.
    pub entity_type: EntityType,
    /// Start position (byte offset).
    pub start: usize,
    /// End position (byte offset, exclusive).
    pub end: usize,
    /// Detector confidence in [0.0, 1.0].
    pub score: f64,
    /// Name of the detector that produced this span.
    pub source: String,
}

impl EntitySpan {
    /// Create a new span. Scores are clamped to [0.0, 1.0].
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        entity_type: EntityType,
        start: usize,
        end: usize,
        score: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            entity_type,
            start,
            end,
            score: score.clamp(0.0, 1.0),
            source: source.into(),
        }
    }

    /// Span width in bytes.
    #[must_use]
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check whether this span's range intersects another's.
    #[must_use]
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}
