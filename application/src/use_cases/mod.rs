//! Use cases (application services)

pub mod classify_objective;
pub mod create_question_set;
pub mod generate_batch;

pub use classify_objective::{ClassifyError, ClassifyObjectiveUseCase};
pub use create_question_set::{CreateQuestionSetError, CreateQuestionSetUseCase};
pub use generate_batch::{
    AttemptError, FailureClass, GenerateBatchInput, GenerateBatchUseCase, GenerationError,
};
