//! Application layer for quizsmith
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.
//!
//! The central use case is
//! [`GenerateBatchUseCase`](use_cases::generate_batch::GenerateBatchUseCase):
//! prompt construction, model invocation, response validation, and the
//! bounded retry/backoff loop that absorbs upstream unreliability.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RetryPolicy;
pub use ports::{
    model_client::{ModelClient, ModelClientError},
    question_store::{QuestionFilter, QuestionRepository, RepositoryError},
};
pub use use_cases::{
    classify_objective::{ClassifyError, ClassifyObjectiveUseCase},
    create_question_set::{CreateQuestionSetError, CreateQuestionSetUseCase},
    generate_batch::{
        AttemptError, FailureClass, GenerateBatchInput, GenerateBatchUseCase, GenerationError,
    },
};
