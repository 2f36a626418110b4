//! Domain types shared by the matching, retrieval and pipeline crates.

use serde::{Deserialize, Serialize};

/// A known question/answer pair from the institutional FAQ table.
///
/// Entries are read as a full snapshot per resolution call; the pipeline
/// never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(rename = "pergunta")]
    pub question: String,
    #[serde(rename = "resposta")]
    pub answer: String,
}

/// A fixed-size slice of an ingested document's extracted text.
///
/// - `title`: name of the source document (upload filename or file stem)
/// - `text`: the chunk payload
/// - `embedding`: dense vector for this chunk, `None` until backfilled.
///   All embeddings produced by one provider model share a fixed
///   dimensionality; comparisons assume identical embedding spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "chunk")]
    pub text: String,
    pub embedding: Option<Vec<f32>>,
}

/// Labels which stage of the resolution pipeline produced a reply.
///
/// Serialized forms are the wire tags the chat front end already knows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceTag {
    #[serde(rename = "FAQ")]
    Faq,
    #[serde(rename = "RAG")]
    Rag,
    #[serde(rename = "RAG_FALLBACK")]
    RagFallback,
    #[serde(rename = "WEB_OFICIAL")]
    WebOfficial,
    #[serde(rename = "WEB_PADRAO")]
    WebDefault,
    #[serde(rename = "IA")]
    Ai,
    #[serde(rename = "BASE_OFICIAL")]
    Default,
    #[serde(rename = "ERRO")]
    Error,
}

/// The pipeline's sole output: one reply plus its provenance tag.
///
/// Created fresh per request, never persisted. Doubles as the chat wire
/// response (`{ reply, fonte }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub reply: String,
    #[serde(rename = "fonte")]
    pub source: SourceTag,
}

impl Resolution {
    pub fn new(reply: impl Into<String>, source: SourceTag) -> Self {
        Self { reply: reply.into(), source }
    }
}

/// Incoming chat request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// A student question submitted through the intake form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSubmission {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "matricula")]
    pub enrollment: String,
    pub email: String,
    #[serde(rename = "pergunta")]
    pub question: String,
}

impl QuestionSubmission {
    /// All four intake fields are required.
    pub fn is_complete(&self) -> bool {
        !(self.name.trim().is_empty()
            || self.enrollment.trim().is_empty()
            || self.email.trim().is_empty()
            || self.question.trim().is_empty())
    }
}

/// A persisted intake submission, as listed in the admin view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: u64,
    #[serde(flatten)]
    pub submission: QuestionSubmission,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}
