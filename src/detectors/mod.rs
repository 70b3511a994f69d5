//! Built-in entity detectors.
//!
//! Two families ship with the crate:
//!
//! - [`PatternRecognizer`]: regex-driven recognizers with a fixed score,
//!   for structured entities (postal codes, long numeric codes, dates,
//!   contact details) and for the composite street recognizer that matches
//!   the `<LOCATION>` placeholder left by an earlier pass.
//! - [`GermanNer`]: a dependency-free heuristic stand-in for a statistical
//!   NER model, driven by high-precision structural signals (titles,
//!   legal-form suffixes, locative prepositions).
//!
//! Real ML-backed NER lives outside this crate behind the
//! [`Detector`](crate::Detector) trait; plugging one in replaces
//! [`GermanNer`] without touching pipeline code.

pub mod heuristic;
pub mod pattern;

pub use heuristic::GermanNer;
pub use pattern::PatternRecognizer;
