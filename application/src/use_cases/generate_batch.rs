//! Generate Batch use case.
//!
//! Drives one generation request end to end: build the prompt from the
//! classification, invoke the model, validate the response, and retry
//! with exponential backoff while attempts remain. Returns a validated
//! [`QuestionBatch`] or a terminal error that still carries the last
//! underlying cause.
//!
//! Attempts run strictly sequentially; the backoff wait is a suspension
//! point, and a caller-supplied cancellation token is observed before
//! each attempt and during each wait. The use case holds no mutable
//! state, so concurrent invocations are fully independent.

use crate::config::RetryPolicy;
use crate::ports::model_client::{ModelClient, ModelClientError};
use quizsmith_domain::{
    Classification, PromptProfile, QuestionBatch, ValidationError, validate_batch,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Which class of failure exhausted the retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Every attempt returned text the validator rejected.
    MalformedOutput,
    /// Every attempt failed at the model call itself.
    Upstream,
}

impl std::fmt::Display for FailureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureClass::MalformedOutput => write!(f, "model output never validated"),
            FailureClass::Upstream => write!(f, "upstream model calls failed"),
        }
    }
}

/// A single failed attempt: either the call failed or its output did.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ModelClientError),
}

impl AttemptError {
    fn class(&self) -> FailureClass {
        match self {
            AttemptError::Invalid(_) => FailureClass::MalformedOutput,
            AttemptError::Client(_) => FailureClass::Upstream,
        }
    }

    fn is_rate_limited(&self) -> bool {
        matches!(self, AttemptError::Client(e) if e.is_rate_limited())
    }
}

/// Errors that can occur during batch generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Non-retryable setup/credential problem, surfaced on the attempt
    /// that hit it regardless of attempts remaining.
    #[error("model client configuration error: {0}")]
    Configuration(String),

    #[error("generation cancelled")]
    Cancelled,

    /// Retries exhausted; `source` is the failure of the final attempt.
    #[error("question generation failed after {attempts} attempts: {class}")]
    Exhausted {
        attempts: u32,
        class: FailureClass,
        #[source]
        source: AttemptError,
    },
}

/// Input for the [`GenerateBatchUseCase`].
#[derive(Debug, Clone)]
pub struct GenerateBatchInput {
    /// The learning objective, as free text.
    pub description: String,
    /// Subject/topic categorization produced by the classification step.
    pub classification: Classification,
}

impl GenerateBatchInput {
    pub fn new(description: impl Into<String>, classification: Classification) -> Self {
        Self {
            description: description.into(),
            classification,
        }
    }
}

/// Use case for generating one validated question batch.
pub struct GenerateBatchUseCase {
    model_client: Arc<dyn ModelClient>,
    profile: PromptProfile,
    retry: RetryPolicy,
    cancellation_token: Option<CancellationToken>,
}

impl GenerateBatchUseCase {
    pub fn new(model_client: Arc<dyn ModelClient>) -> Self {
        Self {
            model_client,
            profile: PromptProfile::default(),
            retry: RetryPolicy::default(),
            cancellation_token: None,
        }
    }

    /// Override the prompt profile (language, audience, phrasing).
    pub fn with_profile(mut self, profile: PromptProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the generation request.
    pub async fn execute(
        &self,
        input: &GenerateBatchInput,
    ) -> Result<QuestionBatch, GenerationError> {
        let messages = self
            .profile
            .generation_messages(&input.description, &input.classification);
        let max_attempts = self.retry.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            self.check_cancelled()?;
            debug!(attempt, max_attempts, "generation attempt");

            let failure = match self.model_client.complete(&messages).await {
                Ok(raw) => match validate_batch(&raw) {
                    Ok(batch) => {
                        info!(attempt, "question batch validated");
                        return Ok(batch);
                    }
                    Err(error) => {
                        warn!(attempt, %error, "response failed validation");
                        AttemptError::Invalid(error)
                    }
                },
                Err(ModelClientError::Configuration(message)) => {
                    warn!(attempt, %message, "configuration failure, not retrying");
                    return Err(GenerationError::Configuration(message));
                }
                Err(error) => {
                    warn!(attempt, %error, "model call failed");
                    AttemptError::Client(error)
                }
            };

            if attempt >= max_attempts {
                return Err(GenerationError::Exhausted {
                    attempts: attempt,
                    class: failure.class(),
                    source: failure,
                });
            }

            let delay = self.retry.delay_after(attempt, failure.is_rate_limited());
            debug!(attempt, ?delay, "backing off before retry");
            self.sleep_cancellable(delay).await?;
        }
    }

    fn check_cancelled(&self) -> Result<(), GenerationError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(GenerationError::Cancelled);
        }
        Ok(())
    }

    async fn sleep_cancellable(&self, delay: Duration) -> Result<(), GenerationError> {
        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => Err(GenerationError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}
