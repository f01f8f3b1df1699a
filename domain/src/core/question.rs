//! Question entity and difficulty tiers

use serde::{Deserialize, Serialize};

/// Difficulty tier of a question.
///
/// These are the internal tier codes carried on the wire (`"easy"`,
/// `"medium"`, `"hard"`). Any display-layer renaming happens outside
/// the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Get the wire/storage code for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not one of the three tier codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl std::str::FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

/// A multiple-choice question (Entity)
///
/// The unit produced by generation and accepted by validation. Option
/// order is significant: `correct_answer` indexes into `options`.
///
/// Wire field names (`question`, `correctAnswer`) follow the JSON shape
/// the model is instructed to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub subject: String,
    pub topic: String,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    pub difficulty: Difficulty,
}

impl Question {
    /// The text of the correct option.
    ///
    /// # Panics
    /// Panics if `correct_answer` does not index into `options`; validated
    /// questions always satisfy this.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

/// A question that has been persisted and assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: i64,
    #[serde(rename = "learningObjective")]
    pub learning_objective: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(flatten)]
    pub question: Question,
}
