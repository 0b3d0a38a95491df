//! Configuration types.

use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Model used when `DEFAULT_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "deepseek-r1:7b";

/// Backend base URL used when `OLLAMA_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Per-request timeout for generation calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Sampling options sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// Maximum output tokens.
    pub num_predict: u32,
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_predict: 2048,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Connection settings for the Ollama generation backend.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Model identifier, e.g. `deepseek-r1:7b`.
    pub model: String,
    /// Base URL without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    pub options: GenerationOptions,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            options: GenerationOptions::default(),
        }
    }
}

impl OllamaConfig {
    /// Build from `DEFAULT_MODEL` and `OLLAMA_BASE_URL`, falling back to the
    /// defaults for unset or blank values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| get(key).filter(|s| !s.trim().is_empty());

        let model = non_blank("DEFAULT_MODEL")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            non_blank("OLLAMA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::default().with_model(model).with_base_url(&base_url)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL after checking it is an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the generate endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        key: "OLLAMA_BASE_URL".to_string(),
        message: format!("{trimmed:?} is not a valid URL: {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: "OLLAMA_BASE_URL".to_string(),
            message: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

/// Load a `.env` file from the working directory if one exists.
///
/// Returns whether a file was loaded.
pub fn load_env_file() -> Result<bool, ConfigError> {
    if Path::new(".env").exists() {
        dotenvy::dotenv()?;
        return Ok(true);
    }
    Ok(false)
}
