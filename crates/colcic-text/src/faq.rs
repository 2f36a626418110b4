use colcic_core::types::FaqEntry;

use crate::normalize::normalize;
use crate::score::text_overlap;

/// Exact/containment FAQ match: the entry whose normalized question
/// equals the normalized input, or is a substring of it.
///
/// Containment (not strict equality) is the chosen behavior: a student
/// wrapping a known question in extra words still hits the entry.
pub fn match_exact<'a>(text: &str, entries: &'a [FaqEntry]) -> Option<&'a FaqEntry> {
    let norm = normalize(text);
    if norm.is_empty() {
        return None;
    }
    entries.iter().find(|e| {
        let q = normalize(&e.question);
        !q.is_empty() && norm.contains(&q)
    })
}

/// Best fuzzy FAQ match by text overlap, accepted only at or above
/// `min_score`. On a tie the first entry in storage order wins, so the
/// result is stable for identical input across calls.
pub fn match_fuzzy<'a>(
    text: &str,
    entries: &'a [FaqEntry],
    min_score: f32,
) -> Option<&'a FaqEntry> {
    let mut best: Option<(&FaqEntry, f32)> = None;
    for e in entries {
        let score = text_overlap(&e.question, text);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((e, score));
        }
    }
    best.and_then(|(e, score)| (score >= min_score).then_some(e))
}

/// Intent-driven lookup: the first entry whose normalized question
/// contains the intent's canonical phrase.
pub fn match_intent<'a>(canonical: &str, entries: &'a [FaqEntry]) -> Option<&'a FaqEntry> {
    entries
        .iter()
        .find(|e| normalize(&e.question).contains(canonical))
}
