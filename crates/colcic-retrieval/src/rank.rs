use colcic_core::types::DocumentChunk;

use crate::similarity::cosine;

/// A chunk paired with its cosine score against the query. Higher is
/// always better.
#[derive(Debug, Clone)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a DocumentChunk,
    pub score: f32,
}

/// Case-insensitive substring filter over chunk text, capped at `limit`.
/// Order is storage order; this is the lexical fallback, not a ranking.
pub fn rank_by_substring<'a>(
    keyword: &str,
    chunks: &'a [DocumentChunk],
    limit: usize,
) -> Vec<&'a DocumentChunk> {
    if keyword.trim().is_empty() {
        return Vec::new();
    }
    let needle = keyword.to_lowercase();
    chunks
        .iter()
        .filter(|c| c.text.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Scores every embedded chunk against the query vector, descending by
/// cosine score, truncated to `top_k`. Chunks without an embedding are
/// skipped silently; a chunk whose embedding dimensionality disagrees
/// with the query is skipped with a warning.
pub fn rank_by_embedding<'a>(
    query: &[f32],
    chunks: &'a [DocumentChunk],
    top_k: usize,
) -> Vec<ScoredChunk<'a>> {
    let mut scored = Vec::new();
    for c in chunks {
        let Some(embedding) = c.embedding.as_deref() else {
            continue;
        };
        if embedding.len() != query.len() {
            tracing::warn!(
                title = %c.title,
                expected = query.len(),
                got = embedding.len(),
                "skipping chunk with mismatched embedding dimension"
            );
            continue;
        }
        scored.push(ScoredChunk { chunk: c, score: cosine(query, embedding) });
    }
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}
