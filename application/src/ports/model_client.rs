//! Model client port
//!
//! Defines the interface for the external text-generation model.
//! Implementations (adapters) live in the infrastructure layer; the use
//! cases only depend on this capability surface.

use async_trait::async_trait;
use quizsmith_domain::PromptMessage;
use thiserror::Error;

/// Errors that can occur when invoking the model.
///
/// The variants carry the classification the retry policy needs: rate
/// limits back off harder, configuration problems are never retried,
/// everything else is a generic retryable failure.
#[derive(Error, Debug)]
pub enum ModelClientError {
    #[error("rate limited by upstream: {0}")]
    RateLimited(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    RequestFailed(String),
}

impl ModelClientError {
    /// Whether the retry policy should apply the rate-limit backoff class.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ModelClientError::RateLimited(_))
    }

    /// Whether retrying can possibly help.
    ///
    /// Credential and setup problems fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ModelClientError::Configuration(_))
    }
}

/// Client for the external generation/classification model
///
/// One call per attempt: a prompt message sequence in, free text out.
/// The returned text is *expected* to be JSON but carries no guarantee;
/// that is what the validation pipeline is for. Timeouts are the
/// adapter's responsibility and surface as [`ModelClientError::Timeout`].
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ModelClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        assert!(ModelClientError::RateLimited("429".to_string()).is_rate_limited());
        assert!(!ModelClientError::Timeout.is_rate_limited());
    }

    #[test]
    fn test_configuration_is_not_retryable() {
        assert!(!ModelClientError::Configuration("missing key".to_string()).is_retryable());
        assert!(ModelClientError::RateLimited("429".to_string()).is_retryable());
        assert!(ModelClientError::Timeout.is_retryable());
        assert!(ModelClientError::RequestFailed("boom".to_string()).is_retryable());
    }
}
