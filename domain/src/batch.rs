//! Question batch and its distributional invariants
//!
//! A [`QuestionBatch`] is the fixed-size collection produced for one
//! learning objective: exactly [`BATCH_SIZE`] questions, exactly
//! [`QUESTIONS_PER_TIER`] per difficulty tier. The constructor is the
//! only way to obtain one, so holding a `QuestionBatch` is proof the
//! invariants hold.

use crate::core::question::{Difficulty, Question};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Number of questions in a batch.
pub const BATCH_SIZE: usize = 9;

/// Number of questions per difficulty tier in a batch.
pub const QUESTIONS_PER_TIER: usize = 3;

/// Number of answer options per question.
pub const OPTION_COUNT: usize = 4;

/// Observed per-tier question counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl TierCounts {
    /// Count questions per tier.
    pub fn tally(questions: &[Question]) -> Self {
        let mut counts = TierCounts {
            easy: 0,
            medium: 0,
            hard: 0,
        };
        for question in questions {
            match question.difficulty {
                Difficulty::Easy => counts.easy += 1,
                Difficulty::Medium => counts.medium += 1,
                Difficulty::Hard => counts.hard += 1,
            }
        }
        counts
    }

    /// Whether every tier holds exactly [`QUESTIONS_PER_TIER`] questions.
    pub fn is_balanced(&self) -> bool {
        self.easy == QUESTIONS_PER_TIER
            && self.medium == QUESTIONS_PER_TIER
            && self.hard == QUESTIONS_PER_TIER
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl std::fmt::Display for TierCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "easy={} medium={} hard={}",
            self.easy, self.medium, self.hard
        )
    }
}

/// A validated batch of questions
///
/// Order is preserved exactly as received from validation; no ordering
/// is guaranteed among tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBatch {
    questions: Vec<Question>,
}

impl QuestionBatch {
    /// Build a batch, enforcing the count and distribution invariants.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.len() != BATCH_SIZE {
            return Err(ValidationError::WrongCount(questions.len()));
        }
        let counts = TierCounts::tally(&questions);
        if !counts.is_balanced() {
            return Err(ValidationError::WrongDistribution(counts));
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions belonging to one tier, in batch order.
    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.difficulty == difficulty)
    }
}
