use async_trait::async_trait;

use crate::types::{DocumentChunk, FaqEntry, QuestionSubmission, StoredQuestion};

/// Typed queries over the relational store. Snapshots only; no
/// transactional multi-row contract is required.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn faq_entries(&self) -> anyhow::Result<Vec<FaqEntry>>;
    async fn document_chunks(&self) -> anyhow::Result<Vec<DocumentChunk>>;
    async fn insert_chunk(&self, chunk: DocumentChunk) -> anyhow::Result<()>;
    /// Distinct titles of ingested documents.
    async fn document_titles(&self) -> anyhow::Result<Vec<String>>;
    async fn insert_question(&self, submission: QuestionSubmission) -> anyhow::Result<u64>;
    async fn list_questions(&self) -> anyhow::Result<Vec<StoredQuestion>>;
    async fn delete_question(&self, id: u64) -> anyhow::Result<()>;
}

/// External language-model provider: embeddings, completions and
/// domain-restricted web search.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Embedding dimensionality, fixed per model.
    fn dim(&self) -> usize;
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
    /// Free-text result, or a response containing the literal
    /// [`NOT_FOUND_SENTINEL`] token when nothing was found.
    async fn web_search(&self, prompt: &str, allowed_domains: &[String])
        -> anyhow::Result<String>;
}

/// Out-of-band "no result" marker the web-search path must parse
/// literally out of an otherwise free-text response.
pub const NOT_FOUND_SENTINEL: &str = "NAO_ENCONTRADO";

/// Turns an uploaded file's bytes into raw text.
pub trait DocumentIngester: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

/// Opaque credential/session capability. Hashing and cookie mechanics
/// live behind this seam.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn verify(&self, identity: &str, secret: &str) -> anyhow::Result<bool>;
    async fn create_session(&self, identity: &str) -> anyhow::Result<String>;
    /// Identity bound to the token, if the session is live.
    async fn session_identity(&self, token: &str) -> anyhow::Result<Option<String>>;
    async fn destroy_session(&self, token: &str) -> anyhow::Result<()>;
}
