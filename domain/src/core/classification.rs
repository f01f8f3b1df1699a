//! Classification record produced by the subject/topic classifier

use crate::core::subject::Subject;
use serde::{Deserialize, Serialize};

/// Subject/topic categorization of a learning objective (Value Object)
///
/// Produced by the classification step and consumed by prompt
/// construction. `grade_level` and `focus` are descriptive extras that
/// only shape prompt wording; they take no part in validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub subject: Subject,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl Classification {
    pub fn new(subject: Subject, topic: impl Into<String>) -> Self {
        Self {
            subject,
            topic: topic.into(),
            grade_level: None,
            focus: None,
        }
    }

    pub fn with_grade_level(mut self, grade_level: impl Into<String>) -> Self {
        self.grade_level = Some(grade_level.into());
        self
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }
}
