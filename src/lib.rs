//! # redakt
//!
//! Multi-pass PII redaction for German-language documents.
//!
//! Detected entity spans (names, locations, organizations, dates, contact
//! details, postal codes, street addresses) are replaced by typed
//! placeholder tokens such as `<PERSON>` or `<LOCATION>`. Redaction is
//! lossy and one-directional.
//!
//! ## Quick Start
//!
//! ```rust
//! use redakt::Pipeline;
//!
//! let pipeline = Pipeline::german();
//! let outcome = pipeline.run("Herr Müller wohnt in Berlin.").unwrap();
//! assert!(outcome.text.contains("<PERSON>"));
//! assert!(outcome.text.contains("<LOCATION>"));
//! ```
//!
//! ## How it works
//!
//! A [`Pipeline`] is an ordered sequence of [`Pass`]es. Each pass runs a
//! set of [`Detector`]s over the current text, merges their candidate
//! spans through the [`SpanResolver`] into a non-overlapping set, and
//! replaces each surviving span with its type's placeholder token. The
//! redacted text feeds the next pass.
//!
//! The pass order is a contract, not an implementation detail: the
//! composite street recognizer matches the `<LOCATION>` placeholder left
//! by an earlier pass, so it can only ever fire on already-redacted text.
//! See [`Pipeline::german`] for the default pass configuration.
//!
//! ## Detectors
//!
//! | Detector | Entities | Notes |
//! |----------|----------|-------|
//! | [`GermanNer`] | PERSON, LOCATION, ORGANIZATION | heuristic, dependency-free |
//! | [`PatternRecognizer`] | structured types | regex + fixed score |
//! | external ML models | anything | implement [`Detector`] |
//!
//! `Detector` is an open trait on purpose: statistical NER models live
//! behind it as external collaborators, and swapping one in changes no
//! pipeline or resolver code.
//!
//! ## Custom pipelines
//!
//! ```rust
//! use std::sync::Arc;
//! use redakt::{EntityType, Pass, Pipeline, PatternRecognizer, SpanResolver};
//!
//! let pipeline = Pipeline::builder()
//!     .pass(
//!         Pass::new("postcodes", 0.3)
//!             .detector(Arc::new(PatternRecognizer::postcode()))
//!             .entity_types(&[EntityType::Postcode]),
//!     )
//!     .resolver(SpanResolver::new())
//!     .build();
//!
//! let outcome = pipeline.run("Musterstadt 12345").unwrap();
//! assert_eq!(outcome.text, "Musterstadt <POSTCODE>");
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod detectors;
mod entity;
mod error;
pub mod ingest;
mod pipeline;
mod redact;
mod resolve;

pub use detectors::{GermanNer, PatternRecognizer};
pub use entity::{EntitySpan, EntityType};
pub use error::{Error, Result};
pub use pipeline::{GermanOptions, Pass, Pipeline, PipelineBuilder, RedactionOutcome};
pub use redact::{redact, PassReport, Replacement};
pub use resolve::SpanResolver;

/// Trait for entity detectors.
///
/// A detector scans one fixed document snapshot and returns candidate PII
/// spans. Implementations range from regex recognizers
/// ([`PatternRecognizer`]) to heuristics ([`GermanNer`]) to external
/// statistical NER models.
///
/// # Contract
///
/// - Returned spans have `entity_type` drawn from `entity_types` and
///   `score >= score_threshold`; callers never re-filter.
/// - Offsets are byte offsets into `text`, on character boundaries, with
///   `start < end <= text.len()`.
/// - `detect` must be deterministic for a given input.
/// - Implementations must be safe for concurrent calls (`Send + Sync`);
///   distinct documents may be processed by distinct pipeline instances in
///   parallel.
pub trait Detector: Send + Sync {
    /// Detect candidate entity spans in `text`.
    ///
    /// `entity_types` restricts which types the detector should look for;
    /// `score_threshold` is the minimum confidence a candidate needs to be
    /// returned.
    fn detect(
        &self,
        text: &str,
        entity_types: &[EntityType],
        score_threshold: f64,
    ) -> Result<Vec<EntitySpan>>;

    /// Entity types this detector can produce.
    fn supported_types(&self) -> Vec<EntityType>;

    /// Whether the detector is ready to use. An unavailable detector in a
    /// pipeline is a fatal configuration error, not a silent skip.
    fn is_available(&self) -> bool {
        true
    }

    /// Detector name, used in span provenance and resolver priority.
    fn name(&self) -> &str;

    /// Short human-readable description.
    fn description(&self) -> &str {
        "entity detector"
    }
}

/// A scripted detector for tests.
///
/// Returns a fixed set of spans, filtered through the [`Detector`]
/// contract (requested types and score threshold), so tests can drive the
/// pipeline without any real detection logic.
///
/// # Example
///
/// ```rust
/// use redakt::{Detector, EntitySpan, EntityType, MockDetector};
///
/// let mock = MockDetector::new("mock").with_spans(vec![
///     EntitySpan::new("Müller", EntityType::Person, 5, 12, 0.9, "mock"),
/// ]);
/// let spans = mock.detect("Herr Müller", &[EntityType::Person], 0.5).unwrap();
/// assert_eq!(spans.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockDetector {
    name: String,
    spans: Vec<EntitySpan>,
    available: bool,
}

impl MockDetector {
    /// Create a new mock detector.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spans: Vec::new(),
            available: true,
        }
    }

    /// Set the spans to return on detection.
    #[must_use]
    pub fn with_spans(mut self, spans: Vec<EntitySpan>) -> Self {
        self.spans = spans;
        self
    }

    /// Mark the detector as unavailable (to exercise failure paths).
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl Detector for MockDetector {
    fn detect(
        &self,
        _text: &str,
        entity_types: &[EntityType],
        score_threshold: f64,
    ) -> Result<Vec<EntitySpan>> {
        Ok(self
            .spans
            .iter()
            .filter(|s| entity_types.contains(&s.entity_type) && s.score >= score_threshold)
            .cloned()
            .collect())
    }

    fn supported_types(&self) -> Vec<EntityType> {
        let mut types: Vec<_> = self.spans.iter().map(|s| s.entity_type).collect();
        types.dedup();
        types
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "scripted detector for tests"
    }
}
