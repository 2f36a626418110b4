use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use colcic_core::traits::{InferenceProvider, NOT_FOUND_SENTINEL};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";
// text-embedding-3-small
const DEFAULT_EMBED_DIM: usize = 1536;

/// Adapter for an OpenAI-compatible HTTP API: embeddings and chat
/// completions. Web search is delegated as an instruction-wrapped
/// completion restricted to the allowed domains.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    embed_model: String,
    chat_model: String,
    dim: usize,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            dim: DEFAULT_EMBED_DIM,
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("APP_OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| anyhow!("APP_OPENAI_API_KEY / OPENAI_API_KEY not set"))?;
        let mut provider = Self::new(api_key);
        if let Ok(base) = std::env::var("APP_OPENAI_BASE_URL") {
            provider.base_url = base;
        }
        Ok(provider)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_models(mut self, embed_model: impl Into<String>, chat_model: impl Into<String>) -> Self {
        self.embed_model = embed_model.into();
        self.chat_model = chat_model.into();
        self
    }

    async fn chat(&self, input: &str) -> Result<String> {
        let body = json!({
            "model": self.chat_model,
            "messages": [{ "role": "user", "content": input }],
        });
        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;
        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("completion returned no choices"))
    }
}

#[async_trait]
impl InferenceProvider for OpenAiProvider {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = json!({ "model": self.embed_model, "input": text });
        let resp = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<EmbeddingResponse>()
            .await?;
        let vector = resp
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| anyhow!("embedding response was empty"))?;
        Ok(vector)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.chat(prompt).await
    }

    async fn web_search(&self, prompt: &str, allowed_domains: &[String]) -> Result<String> {
        let input = format!(
            "Pesquise a informação a seguir exclusivamente nos domínios \
             institucionais: {}. Se a informação não estiver disponível \
             nesses domínios, responda apenas com o token {}.\n\n{}",
            allowed_domains.join(", "),
            NOT_FOUND_SENTINEL,
            prompt
        );
        self.chat(&input).await
    }
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}
