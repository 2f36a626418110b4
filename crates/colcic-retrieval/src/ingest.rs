//! Upload ingestion: extract text, chunk, embed each chunk, persist.
//!
//! Ingestion is a longer-running operation that may run concurrently
//! with chat resolution and never blocks it. There is no atomicity
//! across chunks: a mid-way failure leaves the earlier chunks in place
//! and is reported to the caller with the inserted count.

use anyhow::anyhow;
use std::fs;
use std::path::Path;

use colcic_core::traits::{Datastore, DocumentIngester, InferenceProvider};
use colcic_core::types::DocumentChunk;

use crate::chunker::split_text;

/// Outcome of a completed ingestion.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub chunks_inserted: usize,
}

/// DocumentIngester for plain UTF-8 text payloads. Invalid sequences are
/// replaced rather than rejected, matching how raw files are read
/// elsewhere in the system.
pub struct PlainTextIngester;

impl DocumentIngester for PlainTextIngester {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String> {
        Ok(String::from_utf8_lossy(bytes).to_string())
    }
}

/// Removes the spooled upload when the ingestion scope ends, on success
/// and failure alike.
struct RemoveOnDrop<'a>(&'a Path);

impl Drop for RemoveOnDrop<'_> {
    fn drop(&mut self) {
        let _ = fs::remove_file(self.0);
    }
}

/// Ingests one uploaded file: reads it, extracts text, chunks, embeds
/// and inserts every chunk under `title`. The file at `path` is removed
/// when this returns, whether it succeeds or fails.
pub async fn ingest_file(
    path: &Path,
    title: &str,
    ingester: &dyn DocumentIngester,
    provider: &dyn InferenceProvider,
    store: &dyn Datastore,
    chunk_size: usize,
) -> anyhow::Result<IngestReport> {
    let _guard = RemoveOnDrop(path);
    let bytes = fs::read(path)?;
    let text = ingester.extract_text(&bytes)?;
    ingest_text(title, &text, provider, store, chunk_size).await
}

/// Chunks `text`, embeds each chunk independently and inserts it. Fails
/// fast on the first collaborator error, reporting how far it got.
pub async fn ingest_text(
    title: &str,
    text: &str,
    provider: &dyn InferenceProvider,
    store: &dyn Datastore,
    chunk_size: usize,
) -> anyhow::Result<IngestReport> {
    let parts = split_text(text, chunk_size);
    let total = parts.len();
    let mut inserted = 0usize;
    for part in parts {
        let step = async {
            let embedding = provider.embed(&part).await?;
            store
                .insert_chunk(DocumentChunk {
                    title: title.to_string(),
                    text: part.clone(),
                    embedding: Some(embedding),
                })
                .await
        };
        if let Err(e) = step.await {
            return Err(anyhow!(
                "ingestion of '{title}' failed after {inserted} of {total} chunks: {e}"
            ));
        }
        inserted += 1;
    }
    tracing::info!(title, chunks = inserted, "document ingested");
    Ok(IngestReport { chunks_inserted: inserted })
}
