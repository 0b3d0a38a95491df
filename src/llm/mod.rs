//! LLM integration for the onboarding chain.
//!
//! The chain talks to a text-generation backend through the `LlmProvider`
//! trait. The only concrete provider is Ollama's `/api/generate` endpoint,
//! called directly over reqwest. Raw model output is cleaned up in
//! [`cleanup`] before it reaches the caller.

pub mod cleanup;
pub mod ollama;

pub use cleanup::{format_markdown, normalize_content, strip_reasoning};
pub use ollama::OllamaProvider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::OllamaConfig;
use crate::error::GenerationError;

/// Cleaned output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub content: String,
}

impl Generation {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A text-generation backend: one prompt in, one cleaned completion out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier used for requests.
    fn model_name(&self) -> &str;

    /// Generate a completion for a complete prompt.
    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError>;
}

/// Create the Ollama provider from configuration.
pub fn create_provider(config: &OllamaConfig) -> Result<Arc<dyn LlmProvider>, GenerationError> {
    let provider = OllamaProvider::new(config.clone())?;
    tracing::info!(
        model = %config.model,
        base_url = %config.base_url,
        "Using Ollama"
    );
    Ok(Arc::new(provider))
}
