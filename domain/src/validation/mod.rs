//! Validation of raw model output against the batch contract

mod response;

pub use response::{extract_json_object, validate_batch};

use crate::batch::TierCounts;
use thiserror::Error;

/// Why a raw model response was rejected.
///
/// Each variant maps to one stage of the validation pipeline, so callers
/// can tell a transport-level garbage response apart from a structurally
/// sound batch with the wrong shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("response is not a JSON object: {0}")]
    MalformedPayload(String),

    #[error("response is missing the '{0}' array")]
    MissingField(&'static str),

    #[error("question {index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("expected {expected} questions, got {0}", expected = crate::batch::BATCH_SIZE)]
    WrongCount(usize),

    #[error("unbalanced difficulty distribution: {0}")]
    WrongDistribution(TierCounts),
}
