//! Lightweight configuration loader and pipeline tunables.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. The pipeline's thresholds and limits live in [`PipelineConfig`]
//! so observed-revision defaults are named values, not literals.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Pipeline tunables from the `pipeline` table, falling back to the
    /// defaults when the table is absent.
    pub fn pipeline(&self) -> PipelineConfig {
        self.figment
            .extract_inner("pipeline")
            .unwrap_or_else(|_| PipelineConfig::default())
    }
}

/// Tunable constants of the resolution pipeline. Defaults follow the most
/// recent observed revision of the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Character length of one document chunk (non-overlapping window).
    pub chunk_size: usize,
    /// Minimum text-overlap score for a fuzzy FAQ hit.
    pub faq_min_score: f32,
    /// Minimum cosine score for the embedding ranking to be authoritative.
    pub rag_min_score: f32,
    /// How many top chunks feed the grounded completion.
    pub top_k: usize,
    /// Character budget of the raw-context reply when the grounded
    /// completion call fails.
    pub context_char_budget: usize,
    /// Result cap of the lexical substring fallback.
    pub lexical_limit: usize,
    /// Institutional domains the web-search stage is restricted to.
    pub allowed_domains: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            faq_min_score: 0.5,
            rag_min_score: 0.45,
            top_k: 3,
            context_char_budget: 1200,
            lexical_limit: 3,
            allowed_domains: vec!["uesc.br".to_string(), "colcic.uesc.br".to_string()],
        }
    }
}
