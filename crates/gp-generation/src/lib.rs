//! Generation port: the seam between the cache and the model backend
//!
//! The cache and routes only see the [`Generator`] trait. The shipped
//! implementation calls a local Ollama daemon; failures surface as
//! `AppError::Generation` and are never cached or retried here.

use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use tracing::debug;

use gp_types::{AppError, AppResult, GenerationParams};

/// A text-generation capability: prompt and parameters in, text out.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for `prompt`. Potentially slow; callers must
    /// not hold locks across this call.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> AppResult<String>;

    /// The model this generator is bound to.
    fn model(&self) -> &str;
}

/// Generator backed by a local Ollama daemon.
pub struct OllamaGenerator {
    client: Ollama,
    model: String,
}

impl OllamaGenerator {
    /// Connect to the default daemon address (localhost:11434).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Ollama::default(),
            model: model.into(),
        }
    }

    /// Connect to a specific daemon address.
    pub fn with_host(model: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            client: Ollama::new(host.into(), port),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> AppResult<String> {
        let mut options = GenerationOptions::default().temperature(params.temperature);
        if let Some(max_tokens) = params.max_tokens {
            options = options.num_predict(max_tokens as i32);
        }

        let request = GenerationRequest::new(self.model.clone(), prompt.to_string())
            .options(options);

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "generating");

        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        Ok(response.response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
