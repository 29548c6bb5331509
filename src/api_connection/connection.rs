use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error, instrument};

use super::endpoints::{GenerateContentRequest, GenerateContentResponse, GenerationOptions};
use crate::config::ModelConfig;

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in configuration: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: StatusCode,
        error_body: String,
    },
}

/// A text-generation backend: one prompt in, one raw completion out.
///
/// Implementations make exactly one attempt per call. Retrying or repairing
/// output is left to the caller.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ApiConnectionError>;
}

#[async_trait]
impl<T: ModelClient + ?Sized> ModelClient for std::sync::Arc<T> {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ApiConnectionError> {
        (**self).generate(prompt, options).await
    }
}

/// `ModelClient` backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: ModelConfig,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model(), prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ApiConnectionError> {
        let request = GenerateContentRequest::from_prompt(prompt, options);

        debug!(
            temperature = options.temperature,
            max_output_tokens = options.max_output_tokens,
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(self.config.generate_content_url())
            .query(&[("key", self.config.api_key())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, "Model API returned an error");
            return Err(ApiConnectionError::ApiError { status, error_body });
        }

        let body = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = envelope.first_candidate_text().unwrap_or_default();
        if text.is_empty() {
            debug!(finish_reason = ?envelope.first_finish_reason(), "Completion carried no text");
        } else {
            debug!(completion_len = text.len(), "Received completion");
        }
        Ok(text)
    }
}
