//! colcic-pipeline
//!
//! The answer-resolution pipeline: an ordered state machine that turns
//! one user utterance into one reply plus a provenance tag. Stages are
//! evaluated strictly in priority order; each success short-circuits,
//! each collaborator failure is logged and treated as "no match".

pub mod messages;
pub mod service;

use std::sync::Arc;

use colcic_core::config::PipelineConfig;
use colcic_core::traits::{Datastore, InferenceProvider, NOT_FOUND_SENTINEL};
use colcic_core::types::{DocumentChunk, FaqEntry, Resolution, SourceTag};
use colcic_retrieval::{rank_by_embedding, rank_by_substring};
use colcic_text::{extract_keyword, match_exact, match_fuzzy, match_intent, normalize, IntentDetector};

pub use service::ChatService;

/// Normalized keywords implying "give me a link/site/URL".
const LINK_KEYWORDS: &[&str] = &["link", "site", "url", "pagina", "endereco"];

pub struct ResolutionPipeline {
    store: Arc<dyn Datastore>,
    provider: Arc<dyn InferenceProvider>,
    intents: IntentDetector,
    config: PipelineConfig,
}

impl ResolutionPipeline {
    pub fn new(
        store: Arc<dyn Datastore>,
        provider: Arc<dyn InferenceProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self { store, provider, intents: IntentDetector::with_defaults(), config }
    }

    pub fn with_intents(mut self, intents: IntentDetector) -> Self {
        self.intents = intents;
        self
    }

    /// Resolves one message. Stateless per call: FAQ and chunk snapshots
    /// are fetched once, stages run sequentially, and the terminal
    /// default stage cannot fail.
    pub async fn resolve(&self, message: &str) -> anyhow::Result<Resolution> {
        let norm = normalize(message);

        // 1) link/URL intent: delegate to the restricted web search.
        let mut web_attempted = false;
        if LINK_KEYWORDS.iter().any(|k| norm.contains(k)) {
            web_attempted = true;
            match self.web_lookup(message).await {
                Ok(Some(reply)) => return Ok(Resolution::new(reply, SourceTag::WebOfficial)),
                Ok(None) => {
                    return Ok(Resolution::new(messages::WEB_DEFAULT_REPLY, SourceTag::WebDefault))
                }
                Err(e) => tracing::warn!(error = %e, "web lookup failed, falling through"),
            }
        }

        let faq = self.faq_snapshot().await;

        // 2) topic intent over the FAQ.
        if let Some(intent) = self.intents.detect(message) {
            if let Some(entry) = match_intent(intent.canonical, &faq) {
                return Ok(Resolution::new(entry.answer.clone(), SourceTag::Faq));
            }
        }

        // 3) exact/containment FAQ match.
        if let Some(entry) = match_exact(message, &faq) {
            return Ok(Resolution::new(entry.answer.clone(), SourceTag::Faq));
        }

        // 4) fuzzy FAQ match above the overlap gate.
        if let Some(entry) = match_fuzzy(message, &faq, self.config.faq_min_score) {
            return Ok(Resolution::new(entry.answer.clone(), SourceTag::Faq));
        }

        let chunks = self.chunk_snapshot().await;

        // 5) embedding retrieval with grounded completion.
        match self.provider.embed(message).await {
            Ok(query) => {
                let ranked = rank_by_embedding(&query, &chunks, self.config.top_k);
                let confident =
                    ranked.first().is_some_and(|top| top.score >= self.config.rag_min_score);
                if confident {
                    let context = ranked
                        .iter()
                        .map(|s| s.chunk.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\n\n");
                    match self
                        .provider
                        .complete(&messages::grounded_prompt(&context, message))
                        .await
                    {
                        Ok(reply) => return Ok(Resolution::new(reply, SourceTag::Rag)),
                        Err(e) => {
                            // Required resilience: the retrieved context
                            // still answers, truncated to the budget.
                            tracing::warn!(error = %e, "grounded completion failed, replying with raw context");
                            return Ok(Resolution::new(
                                truncate_chars(&context, self.config.context_char_budget),
                                SourceTag::RagFallback,
                            ));
                        }
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "query embedding failed, skipping semantic retrieval"),
        }

        // 6) lexical fallback over the extracted keyword.
        let keyword = extract_keyword(message);
        let hits = rank_by_substring(&keyword, &chunks, self.config.lexical_limit);
        if !hits.is_empty() {
            let context = hits.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n\n");
            match self.provider.complete(&messages::summary_prompt(&context, message)).await {
                Ok(reply) => return Ok(Resolution::new(reply, SourceTag::Rag)),
                Err(e) => tracing::warn!(error = %e, "lexical summary failed, falling through"),
            }
        }

        // 7) web fallback, unless stage 1 already tried.
        if !web_attempted {
            match self.web_lookup(message).await {
                Ok(Some(reply)) => return Ok(Resolution::new(reply, SourceTag::WebOfficial)),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "web fallback failed"),
            }
        }

        // 8) ungrounded inference primed with institutional facts.
        match self.provider.complete(&messages::general_prompt(message)).await {
            Ok(reply) => return Ok(Resolution::new(reply, SourceTag::Ai)),
            Err(e) => tracing::warn!(error = %e, "generic completion failed"),
        }

        // 9) static institutional default. Never fails.
        Ok(Resolution::new(messages::DEFAULT_REPLY, SourceTag::Default))
    }

    /// Restricted web search; `Ok(None)` means the provider answered
    /// with the not-found sentinel.
    async fn web_lookup(&self, message: &str) -> anyhow::Result<Option<String>> {
        let reply =
            self.provider.web_search(message, &self.config.allowed_domains).await?;
        if reply.contains(NOT_FOUND_SENTINEL) {
            return Ok(None);
        }
        Ok(Some(reply))
    }

    async fn faq_snapshot(&self) -> Vec<FaqEntry> {
        match self.store.faq_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "FAQ snapshot unavailable, skipping FAQ stages");
                Vec::new()
            }
        }
    }

    async fn chunk_snapshot(&self) -> Vec<DocumentChunk> {
        match self.store.document_chunks().await {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!(error = %e, "document snapshot unavailable, skipping retrieval stages");
                Vec::new()
            }
        }
    }
}

/// Character-counted truncation; never cuts a multibyte sequence.
fn truncate_chars(s: &str, budget: usize) -> String {
    s.chars().take(budget).collect()
}
