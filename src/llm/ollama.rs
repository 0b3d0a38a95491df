//! Ollama generation client — one non-streaming call to `/api/generate`.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::{GenerationOptions, OllamaConfig};
use crate::error::GenerationError;

use super::cleanup::normalize_content;
use super::{Generation, LlmProvider};

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
}

impl From<GenerationOptions> for RequestOptions {
    fn from(o: GenerationOptions) -> Self {
        Self {
            num_predict: o.num_predict,
            temperature: o.temperature,
            top_p: o.top_p,
        }
    }
}

/// Generation client backed by a local or remote Ollama server.
pub struct OllamaProvider {
    config: OllamaConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Build a client with the configured request timeout.
    pub fn new(config: OllamaConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Transport {
                url: config.base_url.clone(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    fn request_error(&self, url: &str, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout {
                url: url.to_string(),
                timeout: self.config.timeout,
            }
        } else {
            GenerationError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
        let url = self.config.generate_url();
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: self.config.options.into(),
        };

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "Sending generate request"
        );

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Generation backend returned an error");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(|e| self.request_error(&url, e))?;
        let raw = extract_response_text(&body)?;
        let content = normalize_content(&raw)?;

        debug!(
            raw_chars = raw.len(),
            content_chars = content.len(),
            "Generation complete"
        );

        Ok(Generation { content })
    }
}

/// Pull the generated text out of a response body.
///
/// The body must be a JSON object; a missing or non-string `response` field
/// yields empty text.
fn extract_response_text(body: &str) -> Result<String, GenerationError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GenerationError::InvalidResponse {
            reason: format!("body is not JSON: {e}"),
        })?;

    let object = value
        .as_object()
        .ok_or_else(|| GenerationError::InvalidResponse {
            reason: "body is not a JSON object".to_string(),
        })?;

    Ok(object
        .get("response")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string())
}
