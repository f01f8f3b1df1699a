//! Question repository port
//!
//! The persistence boundary for questions: a flat keyed store with
//! filtered reads. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use quizsmith_domain::{Difficulty, Question, StoredQuestion};
use thiserror::Error;

/// Errors that can occur at the persistence boundary.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("question {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Criteria for listing stored questions.
///
/// All fields are optional and combine with AND. Results come back in
/// randomized order so a limited read doubles as quiz assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub limit: Option<u32>,
}

impl QuestionFilter {
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Store for generated questions
///
/// `insert` is called once per question of a successfully validated
/// batch, by the composing use case, never by the generation
/// orchestrator itself.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist one question, returning the stored record with its id.
    async fn insert(
        &self,
        question: &Question,
        learning_objective: &str,
    ) -> Result<StoredQuestion, RepositoryError>;

    /// List stored questions matching the filter, in randomized order.
    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<StoredQuestion>, RepositoryError>;

    /// Replace the editable fields of a stored question.
    async fn update(&self, id: i64, question: &Question) -> Result<StoredQuestion, RepositoryError>;

    /// Delete a stored question.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Distinct topics, optionally narrowed to one subject, sorted.
    async fn topics(&self, subject: Option<&str>) -> Result<Vec<String>, RepositoryError>;
}
