use std::sync::Arc;

use async_trait::async_trait;

use colcic_core::config::PipelineConfig;
use colcic_core::store::MemoryStore;
use colcic_core::traits::{Datastore, InferenceProvider, NOT_FOUND_SENTINEL};
use colcic_core::types::{
    DocumentChunk, FaqEntry, QuestionSubmission, SourceTag, StoredQuestion,
};
use colcic_pipeline::{messages, ResolutionPipeline};

/// Scriptable provider: `None` in a slot makes that call fail.
struct StubProvider {
    embedding: Option<Vec<f32>>,
    completion: Option<String>,
    web: Option<String>,
}

impl StubProvider {
    fn unavailable() -> Self {
        Self { embedding: None, completion: None, web: None }
    }
}

#[async_trait]
impl InferenceProvider for StubProvider {
    fn dim(&self) -> usize {
        2
    }

    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        self.embedding.clone().ok_or_else(|| anyhow::anyhow!("embedding offline"))
    }

    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        self.completion.clone().ok_or_else(|| anyhow::anyhow!("completion offline"))
    }

    async fn web_search(&self, _p: &str, _d: &[String]) -> anyhow::Result<String> {
        self.web.clone().ok_or_else(|| anyhow::anyhow!("web search offline"))
    }
}

/// Datastore whose every query fails, to exercise mid-stage resilience.
struct BrokenStore;

#[async_trait]
impl Datastore for BrokenStore {
    async fn faq_entries(&self) -> anyhow::Result<Vec<FaqEntry>> {
        Err(anyhow::anyhow!("database gone"))
    }
    async fn document_chunks(&self) -> anyhow::Result<Vec<DocumentChunk>> {
        Err(anyhow::anyhow!("database gone"))
    }
    async fn insert_chunk(&self, _c: DocumentChunk) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("database gone"))
    }
    async fn document_titles(&self) -> anyhow::Result<Vec<String>> {
        Err(anyhow::anyhow!("database gone"))
    }
    async fn insert_question(&self, _s: QuestionSubmission) -> anyhow::Result<u64> {
        Err(anyhow::anyhow!("database gone"))
    }
    async fn list_questions(&self) -> anyhow::Result<Vec<StoredQuestion>> {
        Err(anyhow::anyhow!("database gone"))
    }
    async fn delete_question(&self, _id: u64) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("database gone"))
    }
}

fn entry(q: &str, a: &str) -> FaqEntry {
    FaqEntry { question: q.to_string(), answer: a.to_string() }
}

fn chunk(text: &str, embedding: Option<Vec<f32>>) -> DocumentChunk {
    DocumentChunk { title: "regimento.pdf".into(), text: text.into(), embedding }
}

fn pipeline(
    store: MemoryStore,
    provider: StubProvider,
    config: PipelineConfig,
) -> ResolutionPipeline {
    ResolutionPipeline::new(Arc::new(store), Arc::new(provider), config)
}

#[tokio::test]
async fn exact_faq_match_wins_without_any_provider() {
    let store = MemoryStore::new().with_faq(vec![entry("o que é o consu", "X")]);
    let p = pipeline(store, StubProvider::unavailable(), PipelineConfig::default());

    let r = p.resolve("O que é o CONSU?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Faq);
    assert_eq!(r.reply, "X");
}

#[tokio::test]
async fn intent_stage_prefers_vice_coordinator_entry() {
    let store = MemoryStore::new().with_faq(vec![
        entry("quem é o coordenador do curso", "resposta coordenador"),
        entry("quem é o vice coordenador do curso", "resposta vice"),
    ]);
    let p = pipeline(store, StubProvider::unavailable(), PipelineConfig::default());

    let r = p.resolve("quem é o vice-coordenador?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Faq);
    assert_eq!(r.reply, "resposta vice");
}

#[tokio::test]
async fn fuzzy_faq_match_clears_the_overlap_gate() {
    let store = MemoryStore::new().with_faq(vec![entry("prazo matricula", "no prazo oficial")]);
    let p = pipeline(store, StubProvider::unavailable(), PipelineConfig::default());

    let r = p.resolve("prazo trancamento").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Faq);
    assert_eq!(r.reply, "no prazo oficial");
}

#[tokio::test]
async fn unmatched_question_falls_back_to_generic_inference_verbatim() {
    let store = MemoryStore::new();
    let provider = StubProvider {
        embedding: Some(vec![1.0, 0.0]),
        completion: Some("RESPOSTA DA IA".to_string()),
        web: Some(NOT_FOUND_SENTINEL.to_string()),
    };
    let p = pipeline(store, provider, PipelineConfig::default());

    let r = p.resolve("me fale sobre bolsas de pesquisa").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Ai);
    assert_eq!(r.reply, "RESPOSTA DA IA");
}

#[tokio::test]
async fn everything_dry_ends_at_the_institutional_default() {
    let store = MemoryStore::new()
        .with_chunks(vec![chunk("conteúdo sem relação", Some(vec![0.0, 1.0]))]);
    let provider = StubProvider {
        embedding: Some(vec![1.0, 0.0]),
        completion: None,
        web: Some(NOT_FOUND_SENTINEL.to_string()),
    };
    let p = pipeline(store, provider, PipelineConfig::default());

    let r = p.resolve("qual o prazo para colação de grau?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Default);
    assert_eq!(r.reply, messages::DEFAULT_REPLY);
}

#[tokio::test]
async fn grounded_completion_failure_returns_truncated_raw_context() {
    let first = "a".repeat(40);
    let second = "b".repeat(40);
    let store = MemoryStore::new().with_chunks(vec![
        chunk(&first, Some(vec![1.0, 0.0])),
        chunk(&second, Some(vec![0.9, 0.1])),
    ]);
    let provider = StubProvider {
        embedding: Some(vec![1.0, 0.0]),
        completion: None,
        web: Some(NOT_FOUND_SENTINEL.to_string()),
    };
    let config = PipelineConfig { context_char_budget: 50, ..PipelineConfig::default() };
    let p = pipeline(store, provider, config);

    let r = p.resolve("o que diz o regimento sobre transferência?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::RagFallback);
    assert_eq!(r.reply.chars().count(), 50, "capped at the context budget");
    assert!(r.reply.starts_with(&first[..40]), "raw context, best chunk first");
}

#[tokio::test]
async fn link_request_resolves_through_official_web_search() {
    let store = MemoryStore::new();
    let provider = StubProvider {
        embedding: None,
        completion: None,
        web: Some("https://colcic.uesc.br/ é o portal do colegiado".to_string()),
    };
    let p = pipeline(store, provider, PipelineConfig::default());

    let r = p.resolve("Qual o site do COLCIC?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::WebOfficial);
    assert!(r.reply.contains("colcic.uesc.br"));
}

#[tokio::test]
async fn link_request_with_sentinel_gets_the_static_web_reply() {
    let store = MemoryStore::new();
    let provider = StubProvider {
        embedding: None,
        completion: None,
        web: Some(format!("sem resultado: {NOT_FOUND_SENTINEL}")),
    };
    let p = pipeline(store, provider, PipelineConfig::default());

    let r = p.resolve("qual a url da página de matrícula?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::WebDefault);
    assert_eq!(r.reply, messages::WEB_DEFAULT_REPLY);
}

#[tokio::test]
async fn web_stage_failure_falls_through_to_faq() {
    let store = MemoryStore::new()
        .with_faq(vec![entry("qual o site do conselho do curso", "colcic.uesc.br")]);
    // web_search errors; the message still matches the "conselho" intent
    // via "colegiado" further down.
    let p = pipeline(store, StubProvider::unavailable(), PipelineConfig::default());

    let r = p.resolve("qual o site do colegiado?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Faq);
    assert_eq!(r.reply, "colcic.uesc.br");
}

#[tokio::test]
async fn broken_datastore_never_aborts_the_pipeline() {
    let provider = StubProvider {
        embedding: Some(vec![1.0, 0.0]),
        completion: Some("ainda respondo".to_string()),
        web: Some(NOT_FOUND_SENTINEL.to_string()),
    };
    let p = ResolutionPipeline::new(
        Arc::new(BrokenStore),
        Arc::new(provider),
        PipelineConfig::default(),
    );

    let r = p.resolve("o que é o consu?").await.expect("resolve");
    assert_eq!(r.source, SourceTag::Ai);
    assert_eq!(r.reply, "ainda respondo");
}
