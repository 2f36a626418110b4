use anyhow::Result;
use async_trait::async_trait;

use colcic_core::traits::{InferenceProvider, NOT_FOUND_SENTINEL};

const FAKE_DIM: usize = 1536;

/// Deterministic offline provider. Embeddings hash whitespace tokens
/// into buckets and L2-normalize, so identical text always maps to the
/// identical unit vector; completions echo a canned institutional reply;
/// web search always reports the not-found sentinel.
pub struct FakeProvider {
    dim: usize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self { dim: FAKE_DIM }
    }
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceProvider for FakeProvider {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let head: String = prompt.chars().take(120).collect();
        Ok(format!("[resposta simulada] {head}"))
    }

    async fn web_search(&self, _prompt: &str, _allowed_domains: &[String]) -> Result<String> {
        Ok(NOT_FOUND_SENTINEL.to_string())
    }
}
