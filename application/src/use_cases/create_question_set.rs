//! Create Question Set use case.
//!
//! The full pipeline for one learning objective: classify, generate a
//! validated batch, then persist every question. Persistence is this
//! use case's job; the generation orchestrator never touches the
//! repository, and a failed generation stores nothing.

use crate::ports::question_store::{QuestionRepository, RepositoryError};
use crate::use_cases::classify_objective::{ClassifyError, ClassifyObjectiveUseCase};
use crate::use_cases::generate_batch::{
    GenerateBatchInput, GenerateBatchUseCase, GenerationError,
};
use quizsmith_domain::StoredQuestion;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while building a question set.
#[derive(Error, Debug)]
pub enum CreateQuestionSetError {
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("storage failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case composing classification, generation and persistence.
pub struct CreateQuestionSetUseCase {
    classifier: ClassifyObjectiveUseCase,
    generator: GenerateBatchUseCase,
    repository: Arc<dyn QuestionRepository>,
}

impl CreateQuestionSetUseCase {
    pub fn new(
        classifier: ClassifyObjectiveUseCase,
        generator: GenerateBatchUseCase,
        repository: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            classifier,
            generator,
            repository,
        }
    }

    /// Classify, generate and store questions for one learning objective.
    ///
    /// Returns the stored records with their assigned identifiers, in
    /// batch order.
    pub async fn execute(
        &self,
        description: &str,
    ) -> Result<Vec<StoredQuestion>, CreateQuestionSetError> {
        let classification = self.classifier.execute(description).await?;
        info!(
            subject = %classification.subject,
            topic = %classification.topic,
            "generating question batch"
        );

        let batch = self
            .generator
            .execute(&GenerateBatchInput::new(description, classification))
            .await?;

        let mut stored = Vec::with_capacity(batch.len());
        for question in batch.questions() {
            stored.push(self.repository.insert(question, description).await?);
        }

        info!(count = stored.len(), "question set stored");
        Ok(stored)
    }
}
