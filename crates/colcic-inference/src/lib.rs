//! colcic-inference
//!
//! InferenceProvider implementations: an OpenAI-compatible HTTP adapter
//! for production and a deterministic offline fake for tests and local
//! development.

pub mod fake;
pub mod openai;

pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use colcic_core::traits::InferenceProvider;

/// Selects the provider for the current environment.
///
/// `APP_USE_FAKE_INFERENCE=1` forces the offline fake; otherwise the
/// OpenAI-compatible adapter is built from `APP_OPENAI_API_KEY` /
/// `OPENAI_API_KEY`.
pub fn get_default_provider() -> anyhow::Result<Box<dyn InferenceProvider>> {
    let use_fake = std::env::var("APP_USE_FAKE_INFERENCE")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!("using FakeProvider");
        return Ok(Box::new(FakeProvider::new()));
    }
    Ok(Box::new(OpenAiProvider::from_env()?))
}
