//! Heuristic German NER.
//!
//! A dependency-free stand-in for a statistical NER model, built from
//! high-precision structural signals only:
//!
//! 1. Address titles (Herr, Frau, Dr., ...) anchor person names.
//! 2. Legal-form suffixes (GmbH, AG, e.V., ...) anchor organizations.
//! 3. Locative prepositions (in, aus, nach, ...) anchor locations.
//!
//! German capitalizes every noun, so bare capitalization carries almost no
//! signal here, so only anchored matches fire. No large gazetteers: the
//! short fixed word lists below are all the lexical knowledge it carries.
//!
//! Placeholder tokens (`<PERSON>`, `<LOCATION>`, ...) never start with an
//! uppercase letter, so redacted text yields no further matches and the
//! detector is idempotent over its own output.

use crate::{Detector, EntitySpan, EntityType, Result};

const PERSON_SCORE: f64 = 0.85;
const ORG_SCORE: f64 = 0.8;
const LOCATION_SCORE: f64 = 0.6;

const DETECTOR_NAME: &str = "german-ner";

/// Address titles that precede a person name.
const PERSON_TITLES: &[&str] = &[
    "Herr", "Herrn", "Frau", "Hr.", "Fr.", "Dr.", "Prof.", "Dipl.-Ing.",
];

/// Legal-form suffixes that end an organization name.
const ORG_SUFFIXES: &[&str] = &[
    "GmbH", "mbH", "AG", "KG", "KGaA", "OHG", "GbR", "UG", "SE", "eG", "e.V.",
];

/// Locative prepositions that precede a place name.
const LOC_PREPOSITIONS: &[&str] = &["in", "aus", "nach", "bei", "von", "zu"];

/// Capitalized function words (articles, pronouns, sentence-initial
/// prepositions) that are never part of a name.
const CAPITALIZED_FUNCTION_WORDS: &[&str] = &[
    "Die", "Der", "Das", "Den", "Dem", "Des", "Ein", "Eine", "Einer", "Eines", "Einem", "Und",
    "Oder", "Aber", "Im", "In", "Am", "An", "Auf", "Mit", "Für", "Von", "Nach", "Bei", "Zur",
    "Zum", "Sie", "Er", "Es", "Wir", "Ich",
];

/// Frequent preposition + noun idioms that are not places.
const LOC_STOPWORDS: &[&str] = &[
    "Ordnung",
    "Zusammenhang",
    "Bezug",
    "Rahmen",
    "Höhe",
    "Folge",
    "Anlage",
    "Verbindung",
    "Zukunft",
    "Kürze",
    "Vertretung",
    "Absprache",
    "Auftrag",
];

/// Heuristic German NER detector.
///
/// Produces PERSON, ORGANIZATION and LOCATION spans. Swap in an ML-backed
/// [`Detector`] for real statistical coverage; this type exists so the
/// default pipeline works end to end without model dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanNer;

impl GermanNer {
    /// Create a new heuristic detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// A whitespace-delimited token with its byte range.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    raw: &'a str,
    start: usize,
}

impl<'a> Token<'a> {
    /// Token text without leading wrappers (quotes, brackets).
    fn lead_trimmed(&self) -> (usize, &'a str) {
        let trimmed = self.raw.trim_start_matches(is_leading_wrap);
        (self.start + (self.raw.len() - trimmed.len()), trimmed)
    }

    /// Token text without leading wrappers or trailing punctuation.
    fn core(&self) -> (usize, &'a str) {
        let (start, lead) = self.lead_trimmed();
        (start, lead.trim_end_matches(is_trailing_punct))
    }

    /// Whether the token ends a phrase (sentence punctuation after the core).
    fn ends_phrase(&self) -> bool {
        self.raw.ends_with(['.', ',', ';', ':', '!', '?'])
    }
}

fn is_leading_wrap(c: char) -> bool {
    matches!(c, '(' | '[' | '"' | '\'' | '„' | '“' | '»')
}

fn is_trailing_punct(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']' | '"' | '\'' | '“' | '”' | '«')
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    raw: &text[s..i],
                    start: s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            raw: &text[s..],
            start: s,
        });
    }
    tokens
}

fn is_title(tok: &Token<'_>) -> bool {
    let (_, lead) = tok.lead_trimmed();
    let (_, core) = tok.core();
    PERSON_TITLES.contains(&lead) || PERSON_TITLES.contains(&core)
}

fn is_org_suffix(tok: &Token<'_>) -> Option<(usize, usize)> {
    // "e.V." keeps its trailing dot, so check the lead-trimmed form first.
    let (start, lead) = tok.lead_trimmed();
    if ORG_SUFFIXES.contains(&lead) {
        return Some((start, start + lead.len()));
    }
    let (start, core) = tok.core();
    if ORG_SUFFIXES.contains(&core) {
        return Some((start, start + core.len()));
    }
    None
}

/// A capitalized word that can take part in a name: starts uppercase and
/// is not itself a title. Placeholder tokens start with `<` and fail the
/// uppercase test, which is what keeps this detector off redacted text.
fn is_name_word(tok: &Token<'_>) -> bool {
    let (_, core) = tok.core();
    core.chars().next().is_some_and(char::is_uppercase)
        && !is_title(tok)
        && !CAPITALIZED_FUNCTION_WORDS.contains(&core)
}

fn overlaps_any(spans: &[EntitySpan], start: usize, end: usize) -> bool {
    spans.iter().any(|s| !(end <= s.start || start >= s.end))
}

fn push_span(
    spans: &mut Vec<EntitySpan>,
    text: &str,
    entity_type: EntityType,
    start: usize,
    end: usize,
    score: f64,
) {
    if start < end && !overlaps_any(spans, start, end) {
        spans.push(EntitySpan::new(
            &text[start..end],
            entity_type,
            start,
            end,
            score,
            DETECTOR_NAME,
        ));
    }
}

impl GermanNer {
    fn find_persons(&self, text: &str, tokens: &[Token<'_>], spans: &mut Vec<EntitySpan>) {
        let mut i = 0;
        while i < tokens.len() {
            if !is_title(&tokens[i]) {
                i += 1;
                continue;
            }
            // Skip stacked titles: "Frau Dr. Schmidt"
            let mut j = i + 1;
            while j < tokens.len() && is_title(&tokens[j]) {
                j += 1;
            }
            // Collect up to two capitalized name words.
            let mut name_range: Option<(usize, usize)> = None;
            let mut taken = 0;
            while j < tokens.len() && taken < 2 && is_name_word(&tokens[j]) {
                let (start, core) = tokens[j].core();
                name_range = Some(match name_range {
                    None => (start, start + core.len()),
                    Some((s, _)) => (s, start + core.len()),
                });
                taken += 1;
                let ended = tokens[j].ends_phrase();
                j += 1;
                if ended {
                    break;
                }
            }
            if let Some((start, end)) = name_range {
                push_span(spans, text, EntityType::Person, start, end, PERSON_SCORE);
            }
            i = j.max(i + 1);
        }
    }

    fn find_organizations(&self, text: &str, tokens: &[Token<'_>], spans: &mut Vec<EntitySpan>) {
        for (i, tok) in tokens.iter().enumerate() {
            let Some((_, suffix_end)) = is_org_suffix(tok) else {
                continue;
            };
            // Extend left over the capitalized name the suffix closes,
            // allowing "&" as a connector: "Muster & Partner GmbH".
            let mut start = None;
            let mut k = i;
            let mut words = 0;
            while k > 0 && words < 3 {
                let prev = &tokens[k - 1];
                let (_, prev_core) = prev.core();
                if prev.ends_phrase() {
                    break;
                }
                if prev_core == "&" {
                    k -= 1;
                    continue;
                }
                if !is_name_word(prev) {
                    break;
                }
                let (s, _) = prev.core();
                start = Some(s);
                words += 1;
                k -= 1;
            }
            if let Some(start) = start {
                push_span(
                    spans,
                    text,
                    EntityType::Organization,
                    start,
                    suffix_end,
                    ORG_SCORE,
                );
            }
        }
    }

    fn find_locations(&self, text: &str, tokens: &[Token<'_>], spans: &mut Vec<EntitySpan>) {
        for (i, tok) in tokens.iter().enumerate() {
            let (_, core) = tok.core();
            if !LOC_PREPOSITIONS
                .iter()
                .any(|p| core.eq_ignore_ascii_case(p))
                || tok.ends_phrase()
            {
                continue;
            }
            let Some(next) = tokens.get(i + 1) else {
                continue;
            };
            let (start, next_core) = next.core();
            if !is_name_word(next) || LOC_STOPWORDS.contains(&next_core) {
                continue;
            }
            let mut end = start + next_core.len();
            // "Bad Homburg", "Neu Isenburg": one capitalized continuation.
            if !next.ends_phrase() {
                if let Some(second) = tokens.get(i + 2) {
                    if is_name_word(second) {
                        let (s2, c2) = second.core();
                        end = s2 + c2.len();
                    }
                }
            }
            push_span(spans, text, EntityType::Location, start, end, LOCATION_SCORE);
        }
    }
}

impl Detector for GermanNer {
    fn detect(
        &self,
        text: &str,
        entity_types: &[EntityType],
        score_threshold: f64,
    ) -> Result<Vec<EntitySpan>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let tokens = tokenize(text);
        let mut spans = Vec::new();

        if entity_types.contains(&EntityType::Person) && PERSON_SCORE >= score_threshold {
            self.find_persons(text, &tokens, &mut spans);
        }
        if entity_types.contains(&EntityType::Organization) && ORG_SCORE >= score_threshold {
            self.find_organizations(text, &tokens, &mut spans);
        }
        if entity_types.contains(&EntityType::Location) && LOCATION_SCORE >= score_threshold {
            self.find_locations(text, &tokens, &mut spans);
        }

        Ok(spans)
    }

    fn supported_types(&self) -> Vec<EntityType> {
        vec![
            EntityType::Person,
            EntityType::Organization,
            EntityType::Location,
        ]
    }

    fn name(&self) -> &str {
        DETECTOR_NAME
    }

    fn description(&self) -> &str {
        "heuristic German NER (titles, legal forms, prepositions)"
    }
}
