//! The multi-pass redaction pipeline.
//!
//! A pipeline is an ordered sequence of passes. Each pass runs its
//! detectors over the current text, merges all candidates through the
//! [`SpanResolver`], replaces the surviving spans with placeholders, and
//! hands the redacted text to the next pass.
//!
//! The order is a contract: composite recognizers match placeholder
//! tokens left by earlier passes, so the street pass is only meaningful
//! after the pass that redacts locations. Passes never branch, repeat, or
//! run concurrently within one document. Across documents there is no
//! shared mutable state: one pipeline per thread, or one shared behind a
//! reference, both work.

use crate::detectors::{GermanNer, PatternRecognizer};
use crate::redact::{redact, PassReport};
use crate::{Detector, EntityType, Error, Result, SpanResolver};
use serde::Serialize;
use std::sync::Arc;

/// One detect → resolve → redact cycle: a detector set, the entity types
/// they are asked for, and the minimum score a candidate needs.
///
/// Passes are configuration, built once and never mutated.
#[derive(Clone)]
pub struct Pass {
    name: String,
    detectors: Vec<Arc<dyn Detector>>,
    entity_types: Vec<EntityType>,
    score_threshold: f64,
}

impl Pass {
    /// Create an empty pass with a name and score threshold.
    #[must_use]
    pub fn new(name: impl Into<String>, score_threshold: f64) -> Self {
        Self {
            name: name.into(),
            detectors: Vec::new(),
            entity_types: Vec::new(),
            score_threshold,
        }
    }

    /// Add a detector (order only matters for first-seen tie-breaks).
    #[must_use]
    pub fn detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Set the entity types this pass asks its detectors for.
    #[must_use]
    pub fn entity_types(mut self, types: &[EntityType]) -> Self {
        self.entity_types = types.to_vec();
        self
    }

    /// Pass name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum candidate score.
    #[must_use]
    pub fn score_threshold(&self) -> f64 {
        self.score_threshold
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass")
            .field("name", &self.name)
            .field(
                "detectors",
                &self.detectors.iter().map(|d| d.name().to_string()).collect::<Vec<_>>(),
            )
            .field("entity_types", &self.entity_types)
            .field("score_threshold", &self.score_threshold)
            .finish()
    }
}

/// Result of running a pipeline over one document.
///
/// `text` is the final redacted document. `passes` is the audit log: what
/// each pass replaced, with offsets relative to that pass's input
/// snapshot (not to the original raw text; placeholder substitution
/// shifts everything after it).
#[derive(Debug, Clone, Serialize)]
pub struct RedactionOutcome {
    /// The fully redacted text.
    pub text: String,
    /// Per-pass replacement logs, in pass order.
    pub passes: Vec<PassReport>,
}

impl RedactionOutcome {
    /// Total number of replacements across all passes.
    #[must_use]
    pub fn total_replacements(&self) -> usize {
        self.passes.iter().map(|p| p.replacements.len()).sum()
    }
}

/// Options for the default German pipeline configuration.
#[derive(Debug, Clone)]
pub struct GermanOptions {
    /// Threshold for the NER pass (high-precision pass).
    pub ner_threshold: f64,
    /// Threshold for the structured and street passes.
    pub structured_threshold: f64,
    /// Whether to run the composite street pass.
    pub street: bool,
}

impl Default for GermanOptions {
    fn default() -> Self {
        Self {
            ner_threshold: 0.5,
            structured_threshold: 0.3,
            street: true,
        }
    }
}

/// An ordered sequence of redaction passes over one resolver.
///
/// Construct via [`Pipeline::builder`] or use the canned German
/// configuration from [`Pipeline::german`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    passes: Vec<Pass>,
    resolver: SpanResolver,
}

/// Builder for [`Pipeline`] (passes run in insertion order).
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    passes: Vec<Pass>,
    resolver: SpanResolver,
}

impl PipelineBuilder {
    /// Append a pass.
    #[must_use]
    pub fn pass(mut self, pass: Pass) -> Self {
        self.passes.push(pass);
        self
    }

    /// Set the span resolver used by every pass.
    #[must_use]
    pub fn resolver(mut self, resolver: SpanResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Build the configured pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            passes: self.passes,
            resolver: self.resolver,
        }
    }
}

impl Pipeline {
    /// Create a builder for custom configuration.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The default German redaction pipeline with the built-in heuristic
    /// NER detector.
    ///
    /// Three passes:
    ///
    /// 1. **ner**: PERSON / LOCATION / ORGANIZATION, threshold 0.5.
    /// 2. **structured**: DATE_TIME, NRP, PHONE_NUMBER, EMAIL_ADDRESS,
    ///    URL, IBAN_CODE, CODE, POSTCODE, DATE, threshold 0.3.
    /// 3. **street**: the composite STREET recognizer, threshold 0.3.
    ///    Runs last so a postal code after a `<LOCATION>` placeholder is
    ///    already redacted and cannot be half-consumed as a house number.
    ///
    /// The resolver ranks the NER detector above pattern recognizers on
    /// score ties and prefers longer spans, so a six-digit CODE beats the
    /// POSTCODE hiding in its first five digits.
    #[must_use]
    pub fn german() -> Self {
        Self::german_with(GermanOptions::default(), Arc::new(GermanNer::new()))
    }

    /// The German pipeline with a caller-supplied NER detector (an
    /// ML-backed model, or [`GermanNer`] as the dependency-free default).
    #[must_use]
    pub fn german_with(options: GermanOptions, ner: Arc<dyn Detector>) -> Self {
        let ner_name = ner.name().to_string();

        let mut builder = Self::builder()
            .pass(
                Pass::new("ner", options.ner_threshold)
                    .detector(ner)
                    .entity_types(&[
                        EntityType::Person,
                        EntityType::Location,
                        EntityType::Organization,
                    ]),
            )
            .pass(
                Pass::new("structured", options.structured_threshold)
                    .detector(Arc::new(PatternRecognizer::date_time()))
                    .detector(Arc::new(PatternRecognizer::phone()))
                    .detector(Arc::new(PatternRecognizer::email()))
                    .detector(Arc::new(PatternRecognizer::url()))
                    .detector(Arc::new(PatternRecognizer::iban()))
                    .detector(Arc::new(PatternRecognizer::long_code()))
                    .detector(Arc::new(PatternRecognizer::postcode()))
                    .detector(Arc::new(PatternRecognizer::abbreviated_date()))
                    .entity_types(&[
                        EntityType::DateTime,
                        EntityType::Nrp,
                        EntityType::PhoneNumber,
                        EntityType::EmailAddress,
                        EntityType::Url,
                        EntityType::IbanCode,
                        EntityType::Code,
                        EntityType::Postcode,
                        EntityType::Date,
                    ]),
            );

        if options.street {
            builder = builder.pass(
                Pass::new("street", options.structured_threshold)
                    .detector(Arc::new(PatternRecognizer::street()))
                    .entity_types(&[EntityType::Street]),
            );
        }

        builder
            .resolver(SpanResolver::new().with_priority([ner_name]).prefer_longer(true))
            .build()
    }

    /// Number of configured passes.
    #[must_use]
    pub fn num_passes(&self) -> usize {
        self.passes.len()
    }

    /// Pass names in execution order.
    #[must_use]
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass in order over `text` and return the redacted result.
    ///
    /// A pass that detects nothing proceeds with unchanged text. A failing
    /// or unavailable detector aborts the run: partial redaction must
    /// never be emitted silently.
    pub fn run(&self, text: &str) -> Result<RedactionOutcome> {
        let mut current = text.to_string();
        let mut reports = Vec::with_capacity(self.passes.len());

        for pass in &self.passes {
            let mut candidates = Vec::new();
            for detector in &pass.detectors {
                if !detector.is_available() {
                    return Err(Error::detector(format!(
                        "detector '{}' is not available (pass '{}')",
                        detector.name(),
                        pass.name,
                    )));
                }
                candidates.extend(detector.detect(
                    &current,
                    &pass.entity_types,
                    pass.score_threshold,
                )?);
            }

            let resolved = self.resolver.resolve(&current, candidates)?;
            let (next, replacements) = redact(&current, &resolved);
            reports.push(PassReport {
                pass: pass.name.clone(),
                replacements,
            });
            current = next;
        }

        Ok(RedactionOutcome {
            text: current,
            passes: reports,
        })
    }
}
