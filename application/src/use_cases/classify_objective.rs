//! Classify Objective use case.
//!
//! One model call that maps a free-text learning objective to a
//! [`Classification`]. Unlike generation there is no retry loop: a bad
//! classification is cheap to re-request and the caller surfaces the
//! error directly.

use crate::ports::model_client::{ModelClient, ModelClientError};
use quizsmith_domain::{Classification, Subject, classification_messages, extract_json_object};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during classification.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("classification call failed: {0}")]
    Client(#[from] ModelClientError),

    #[error("classifier returned an unusable response: {0}")]
    MalformedResponse(String),

    /// The model answered with a subject outside the known set.
    #[error("unknown subject '{0}', expected one of: {known}", known = Subject::KNOWN.join(", "))]
    UnknownSubject(String),
}

#[derive(Deserialize)]
struct ClassificationWire {
    subject: String,
    topic: String,
}

/// Use case for classifying a learning objective into subject and topic.
pub struct ClassifyObjectiveUseCase {
    model_client: Arc<dyn ModelClient>,
}

impl ClassifyObjectiveUseCase {
    pub fn new(model_client: Arc<dyn ModelClient>) -> Self {
        Self { model_client }
    }

    /// Execute the classification.
    pub async fn execute(&self, description: &str) -> Result<Classification, ClassifyError> {
        debug!("classifying learning objective");
        let messages = classification_messages(description);
        let raw = self.model_client.complete(&messages).await?;

        let object = extract_json_object(&raw)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        let wire: ClassificationWire = serde_json::from_str(object)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

        let subject = Subject::try_known(wire.subject.trim())
            .ok_or_else(|| ClassifyError::UnknownSubject(wire.subject.trim().to_string()))?;
        let topic = wire.topic.trim();
        if topic.is_empty() {
            return Err(ClassifyError::MalformedResponse(
                "empty topic".to_string(),
            ));
        }

        info!(%subject, topic, "learning objective classified");
        Ok(Classification::new(subject, topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quizsmith_domain::PromptMessage;

    struct StaticModelClient {
        response: Result<String, ModelClientError>,
    }

    impl StaticModelClient {
        fn ok(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response.to_string()),
            })
        }
    }

    #[async_trait]
    impl ModelClient for StaticModelClient {
        async fn complete(
            &self,
            _messages: &[PromptMessage],
        ) -> Result<String, ModelClientError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(ModelClientError::Configuration(m)) => {
                    Err(ModelClientError::Configuration(m.clone()))
                }
                Err(_) => Err(ModelClientError::Timeout),
            }
        }
    }

    #[tokio::test]
    async fn test_valid_classification() {
        let client = StaticModelClient::ok(r#"{"subject": "Matematicas", "topic": "Fracciones"}"#);
        let classification = ClassifyObjectiveUseCase::new(client)
            .execute("sumar fracciones con distinto denominador")
            .await
            .unwrap();
        assert_eq!(classification.subject.as_str(), "Matematicas");
        assert_eq!(classification.topic, "Fracciones");
    }

    #[tokio::test]
    async fn test_fenced_response_tolerated() {
        let client = StaticModelClient::ok(
            "```json\n{\"subject\": \"Ciencias\", \"topic\": \"El ciclo del agua\"}\n```",
        );
        let classification = ClassifyObjectiveUseCase::new(client)
            .execute("el ciclo del agua")
            .await
            .unwrap();
        assert_eq!(classification.subject.as_str(), "Ciencias");
    }

    #[tokio::test]
    async fn test_unknown_subject_rejected() {
        let client = StaticModelClient::ok(r#"{"subject": "Filosofia", "topic": "Logica"}"#);
        let error = ClassifyObjectiveUseCase::new(client)
            .execute("introducción a la lógica")
            .await
            .unwrap_err();
        assert!(matches!(error, ClassifyError::UnknownSubject(s) if s == "Filosofia"));
    }

    #[tokio::test]
    async fn test_malformed_response_rejected() {
        let client = StaticModelClient::ok("no puedo clasificar eso");
        let error = ClassifyObjectiveUseCase::new(client)
            .execute("???")
            .await
            .unwrap_err();
        assert!(matches!(error, ClassifyError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_client_error_propagates() {
        let client = Arc::new(StaticModelClient {
            response: Err(ModelClientError::Configuration("no key".to_string())),
        });
        let error = ClassifyObjectiveUseCase::new(client)
            .execute("las plantas")
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ClassifyError::Client(ModelClientError::Configuration(_))
        ));
    }
}
