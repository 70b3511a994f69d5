//! Placeholder substitution.
//!
//! Walks a resolved span set left to right, copying untouched text
//! verbatim and substituting each span with its type's placeholder token.
//! Placeholder lengths differ from the spans they replace, so offsets in
//! the output are not comparable to offsets in the input; later passes
//! must re-detect on the new text.

use crate::{EntitySpan, EntityType};
use serde::{Deserialize, Serialize};

/// One placement-log entry: what was replaced, by what, and where it sat
/// in the pass's input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    /// Text that was redacted away.
    pub original: String,
    /// Placeholder token it became.
    pub placeholder: String,
    /// Entity type of the redacted span.
    pub entity_type: EntityType,
    /// Start offset in the pass's input text.
    pub start: usize,
    /// End offset (exclusive) in the pass's input text.
    pub end: usize,
}

/// The replacements one pipeline pass performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// Pass name, as configured.
    pub pass: String,
    /// Replacements in document order.
    pub replacements: Vec<Replacement>,
}

/// Replace each resolved span with its placeholder token.
///
/// `spans` must be sorted by start and non-overlapping, i.e. the output
/// of [`SpanResolver::resolve`](crate::SpanResolver::resolve). Every
/// character outside the spans is preserved verbatim, in order.
///
/// # Example
///
/// ```rust
/// use redakt::{redact, EntitySpan, EntityType};
///
/// let spans = vec![EntitySpan::new("Berlin", EntityType::Location, 3, 9, 0.9, "t")];
/// let (out, log) = redact("in Berlin", &spans);
/// assert_eq!(out, "in <LOCATION>");
/// assert_eq!(log[0].original, "Berlin");
/// ```
#[must_use]
pub fn redact(text: &str, spans: &[EntitySpan]) -> (String, Vec<Replacement>) {
    let mut out = String::with_capacity(text.len());
    let mut log = Vec::with_capacity(spans.len());
    let mut cursor = 0;

    for span in spans {
        debug_assert!(span.start >= cursor, "spans must be sorted and disjoint");
        debug_assert!(span.end <= text.len());

        let placeholder = span.entity_type.placeholder();
        out.push_str(&text[cursor..span.start]);
        out.push_str(placeholder);
        log.push(Replacement {
            original: text[span.start..span.end].to_string(),
            placeholder: placeholder.to_string(),
            entity_type: span.entity_type,
            start: span.start,
            end: span.end,
        });
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);

    (out, log)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, ty: EntityType, start: usize, end: usize) -> EntitySpan {
        EntitySpan::new(&text[start..end], ty, start, end, 0.9, "t")
    }

    #[test]
    fn replaces_spans_with_placeholders() {
        let text = "Herr Müller wohnt in Berlin.";
        let spans = vec![
            span(text, EntityType::Person, 5, 12),
            span(text, EntityType::Location, 22, 28),
        ];
        let (out, log) = redact(text, &spans);
        assert_eq!(out, "Herr <PERSON> wohnt in <LOCATION>.");
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].original, "Müller");
        assert_eq!(log[1].original, "Berlin");
        assert_eq!(log[1].placeholder, "<LOCATION>");
    }

    #[test]
    fn empty_span_set_returns_text_unchanged() {
        let (out, log) = redact("nichts zu tun", &[]);
        assert_eq!(out, "nichts zu tun");
        assert!(log.is_empty());
    }

    #[test]
    fn full_document_span() {
        let text = "max@beispiel.de";
        let spans = vec![span(text, EntityType::EmailAddress, 0, text.len())];
        let (out, _) = redact(text, &spans);
        assert_eq!(out, "<EMAIL_ADDRESS>");
    }

    #[test]
    fn adjacent_spans() {
        let text = "AB";
        let spans = vec![
            span(text, EntityType::Code, 0, 1),
            span(text, EntityType::Code, 1, 2),
        ];
        let (out, _) = redact(text, &spans);
        assert_eq!(out, "<CODE><CODE>");
    }

    #[test]
    fn text_outside_spans_is_preserved_verbatim() {
        let text = "a 12345 b 67890 c";
        let spans = vec![
            span(text, EntityType::Postcode, 2, 7),
            span(text, EntityType::Postcode, 10, 15),
        ];
        let (out, _) = redact(text, &spans);
        assert_eq!(out, "a <POSTCODE> b <POSTCODE> c");
    }

    #[test]
    fn log_offsets_point_into_input_snapshot() {
        let text = "Kontakt: max@beispiel.de";
        let spans = vec![span(text, EntityType::EmailAddress, 9, 24)];
        let (_, log) = redact(text, &spans);
        assert_eq!(&text[log[0].start..log[0].end], "max@beispiel.de");
    }
}
