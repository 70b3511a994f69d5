//! Property tests for span resolution and redaction invariants.

use proptest::prelude::*;
use redakt::{redact, EntitySpan, EntityType, Pipeline, SpanResolver};

const TEXT_LEN: usize = 64;

fn arb_span() -> impl Strategy<Value = EntitySpan> {
    (
        0..TEXT_LEN - 1,
        1..16usize,
        0..=10u8,
        prop::sample::select(vec!["alpha", "beta", "gamma"]),
        prop::sample::select(vec![
            EntityType::Person,
            EntityType::Location,
            EntityType::Postcode,
            EntityType::Code,
        ]),
    )
        .prop_map(|(start, width, score, source, ty)| {
            let end = (start + width).min(TEXT_LEN);
            EntitySpan::new("x", ty, start, end, f64::from(score) / 10.0, source)
        })
}

/// Independent naive redaction: replace spans back to front.
fn naive_redact(text: &str, spans: &[EntitySpan]) -> String {
    let mut out = text.to_string();
    for span in spans.iter().rev() {
        out.replace_range(span.start..span.end, span.entity_type.placeholder());
    }
    out
}

proptest! {
    #[test]
    fn resolved_spans_never_overlap(candidates in prop::collection::vec(arb_span(), 0..24)) {
        let text = "a".repeat(TEXT_LEN);
        let resolved = SpanResolver::new().resolve(&text, candidates).unwrap();
        for i in 0..resolved.len() {
            for j in (i + 1)..resolved.len() {
                prop_assert!(!resolved[i].overlaps(&resolved[j]));
            }
        }
    }

    #[test]
    fn resolved_spans_are_sorted_and_from_input(
        candidates in prop::collection::vec(arb_span(), 0..24),
    ) {
        let text = "a".repeat(TEXT_LEN);
        let resolved = SpanResolver::new().resolve(&text, candidates.clone()).unwrap();
        for w in resolved.windows(2) {
            prop_assert!(w[0].start <= w[1].start);
        }
        for span in &resolved {
            prop_assert!(candidates.contains(span));
        }
        prop_assert!(resolved.len() <= candidates.len());
    }

    #[test]
    fn resolution_is_deterministic(candidates in prop::collection::vec(arb_span(), 0..24)) {
        let text = "a".repeat(TEXT_LEN);
        let resolver = SpanResolver::new().prefer_longer(true);
        let first = resolver.resolve(&text, candidates.clone()).unwrap();
        let second = resolver.resolve(&text, candidates).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn redaction_agrees_with_naive_replacement(
        candidates in prop::collection::vec(arb_span(), 0..24),
    ) {
        let text: String = (0..TEXT_LEN).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let resolved = SpanResolver::new().resolve(&text, candidates).unwrap();
        let (out, log) = redact(&text, &resolved);
        prop_assert_eq!(&out, &naive_redact(&text, &resolved));
        prop_assert_eq!(log.len(), resolved.len());
    }

    #[test]
    fn coverage_safety_text_outside_spans_survives(
        candidates in prop::collection::vec(arb_span(), 0..24),
    ) {
        let text: String = (0..TEXT_LEN).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let resolved = SpanResolver::new().resolve(&text, candidates).unwrap();
        let (out, _) = redact(&text, &resolved);

        // Remove the placeholders; what remains must be exactly the input
        // minus the resolved ranges, in order.
        let mut expected = String::new();
        let mut cursor = 0;
        for span in &resolved {
            expected.push_str(&text[cursor..span.start]);
            cursor = span.end;
        }
        expected.push_str(&text[cursor..]);

        let mut stripped = out.clone();
        for t in [
            EntityType::Person,
            EntityType::Location,
            EntityType::Postcode,
            EntityType::Code,
        ] {
            stripped = stripped.replace(t.placeholder(), "");
        }
        prop_assert_eq!(stripped, expected);
    }

    #[test]
    fn german_pipeline_is_deterministic(text in "[a-zA-Z0-9 .,@/-]{0,120}") {
        let pipeline = Pipeline::german();
        let first = pipeline.run(&text).unwrap();
        let second = pipeline.run(&text).unwrap();
        prop_assert_eq!(first.text, second.text);
    }
}
