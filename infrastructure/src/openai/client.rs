//! OpenAI-compatible model client implementation

use crate::openai::error::OpenAiError;
use crate::openai::types::{ApiErrorBody, ChatRequest, ChatResponse, ResponseFormat};
use async_trait::async_trait;
use quizsmith_application::ports::model_client::{ModelClient, ModelClientError};
use quizsmith_domain::PromptMessage;
use std::time::Duration;
use tracing::debug;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    /// Endpoint root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.5,
            max_tokens: 4000,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// [`ModelClient`] backed by an OpenAI-compatible chat-completions API.
///
/// The request timeout lives here, not in the use cases: a timed-out
/// call surfaces as [`ModelClientError::Timeout`] and the retry policy
/// treats it as a generic retryable failure.
pub struct OpenAiModelClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiModelClient {
    /// Create a client. Fails fast when no API key is configured.
    pub fn new(config: OpenAiConfig) -> Result<Self, OpenAiError> {
        if config.api_key.trim().is_empty() {
            return Err(OpenAiError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    async fn send(&self, messages: &[PromptMessage]) -> Result<String, OpenAiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::json_object(),
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(model = %self.config.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map(|detail| detail.message)
                .unwrap_or_else(|| status.to_string());
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OpenAiError::EmptyCompletion)
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ModelClientError> {
        self.send(messages).await.map_err(map_error)
    }
}

/// Map adapter errors onto the retry classification the port defines.
fn map_error(error: OpenAiError) -> ModelClientError {
    match error {
        OpenAiError::MissingApiKey => ModelClientError::Configuration(error.to_string()),
        OpenAiError::Api {
            status: 401 | 403,
            message,
        } => ModelClientError::Configuration(message),
        OpenAiError::Api {
            status: 429,
            message,
        } => ModelClientError::RateLimited(message),
        OpenAiError::Request(e) if e.is_timeout() => ModelClientError::Timeout,
        other => ModelClientError::RequestFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> OpenAiError {
        OpenAiError::Api {
            status,
            message: "detail".to_string(),
        }
    }

    #[test]
    fn test_missing_api_key_rejected_at_construction() {
        let result = OpenAiModelClient::new(OpenAiConfig::new("   "));
        assert!(matches!(result, Err(OpenAiError::MissingApiKey)));
    }

    #[test]
    fn test_auth_errors_map_to_configuration() {
        assert!(matches!(
            map_error(api_error(401)),
            ModelClientError::Configuration(_)
        ));
        assert!(matches!(
            map_error(api_error(403)),
            ModelClientError::Configuration(_)
        ));
        assert!(matches!(
            map_error(OpenAiError::MissingApiKey),
            ModelClientError::Configuration(_)
        ));
    }

    #[test]
    fn test_rate_limit_maps_to_rate_limited() {
        assert!(matches!(
            map_error(api_error(429)),
            ModelClientError::RateLimited(_)
        ));
    }

    #[test]
    fn test_other_statuses_map_to_request_failed() {
        assert!(matches!(
            map_error(api_error(500)),
            ModelClientError::RequestFailed(_)
        ));
        assert!(matches!(
            map_error(OpenAiError::EmptyCompletion),
            ModelClientError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAiConfig::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(config.temperature, 0.5);
    }
}
