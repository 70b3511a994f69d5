//! Span conflict resolution.
//!
//! Detectors run independently and freely produce overlapping candidates:
//! a six-digit number is both a CODE and (its first five digits) a
//! POSTCODE; an ML model and a regex may claim the same range with
//! different types. The resolver merges all candidates of one pass into a
//! single non-overlapping, position-sorted set.
//!
//! Within each group of transitively overlapping candidates exactly one
//! span survives, chosen by:
//!
//! 1. higher score,
//! 2. higher-priority source detector (an explicit configured order;
//!    whether statistical NER outranks pattern recognizers is a
//!    configuration decision, not baked into the algorithm),
//! 3. longer span, if [`prefer_longer`](SpanResolver::prefer_longer) is
//!    set,
//! 4. otherwise first-seen, which makes resolution deterministic for a
//!    given candidate order.

use crate::{EntitySpan, Error, Result};

/// Merges candidate spans into a non-overlapping, ordered set.
///
/// # Example
///
/// ```rust
/// use redakt::{EntitySpan, EntityType, SpanResolver};
///
/// let resolver = SpanResolver::new();
/// let text = "0123456789012345678901234";
/// let resolved = resolver
///     .resolve(text, vec![
///         EntitySpan::new("...", EntityType::Person, 10, 20, 0.4, "a"),
///         EntitySpan::new("...", EntityType::Location, 12, 18, 0.9, "b"),
///     ])
///     .unwrap();
/// assert_eq!(resolved.len(), 1);
/// assert_eq!((resolved[0].start, resolved[0].end), (12, 18));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpanResolver {
    priority: Vec<String>,
    prefer_longer: bool,
}

impl SpanResolver {
    /// Create a resolver with no detector priority and first-seen ties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detector priority order (earlier name = higher priority).
    /// Detectors not in the list rank below all listed ones.
    #[must_use]
    pub fn with_priority<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority = names.into_iter().map(Into::into).collect();
        self
    }

    /// Prefer the longer span when score and detector priority tie.
    #[must_use]
    pub fn prefer_longer(mut self, yes: bool) -> Self {
        self.prefer_longer = yes;
        self
    }

    fn rank(&self, source: &str) -> usize {
        self.priority
            .iter()
            .position(|n| n == source)
            .unwrap_or(usize::MAX)
    }

    /// True if `candidate` beats the current `winner` of its group.
    fn beats(&self, candidate: &EntitySpan, winner: &EntitySpan) -> bool {
        if candidate.score != winner.score {
            return candidate.score > winner.score;
        }
        let (cr, wr) = (self.rank(&candidate.source), self.rank(&winner.source));
        if cr != wr {
            return cr < wr;
        }
        if self.prefer_longer && candidate.width() != winner.width() {
            return candidate.width() > winner.width();
        }
        false // first-seen wins a full tie
    }

    /// Resolve `candidates` against the document snapshot `text` into a
    /// non-overlapping set sorted ascending by start offset.
    ///
    /// An empty candidate list resolves to an empty set. A candidate with
    /// out-of-range offsets or offsets off a character boundary is a
    /// programming error in its detector and is rejected with
    /// [`Error::InvalidSpan`] rather than clipped.
    pub fn resolve(&self, text: &str, candidates: Vec<EntitySpan>) -> Result<Vec<EntitySpan>> {
        for span in &candidates {
            validate(text, span)?;
        }

        // Sort indices by position to find overlap groups; keep the
        // original index so ties fall to the first-seen candidate.
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by_key(|&i| (candidates[i].start, candidates[i].end, i));

        let mut resolved: Vec<EntitySpan> = Vec::new();
        let mut group: Vec<usize> = Vec::new();
        let mut group_end = 0usize;

        for &i in &order {
            let span = &candidates[i];
            if group.is_empty() || span.start < group_end {
                group_end = group_end.max(span.end);
                group.push(i);
            } else {
                resolved.push(self.pick(&candidates, &group));
                group.clear();
                group.push(i);
                group_end = span.end;
            }
        }
        if !group.is_empty() {
            resolved.push(self.pick(&candidates, &group));
        }

        resolved.sort_by_key(|s| s.start);
        Ok(resolved)
    }

    /// Pick the surviving span of one overlap group, scanning members in
    /// insertion order.
    fn pick(&self, candidates: &[EntitySpan], group: &[usize]) -> EntitySpan {
        let mut members: Vec<usize> = group.to_vec();
        members.sort_unstable();
        let mut winner = members[0];
        for &i in &members[1..] {
            if self.beats(&candidates[i], &candidates[winner]) {
                winner = i;
            }
        }
        candidates[winner].clone()
    }
}

fn validate(text: &str, span: &EntitySpan) -> Result<()> {
    if span.start >= span.end || span.end > text.len() {
        return Err(Error::invalid_span(format!(
            "detector '{}' produced span {}..{} outside document of length {} (type {})",
            span.source,
            span.start,
            span.end,
            text.len(),
            span.entity_type,
        )));
    }
    if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
        return Err(Error::invalid_span(format!(
            "detector '{}' produced span {}..{} off a character boundary",
            span.source, span.start, span.end,
        )));
    }
    Ok(())
}
