//! Subject value object

use serde::{Deserialize, Serialize};

/// A school subject drawn from the closed set the classifier may emit
/// (Value Object)
///
/// The set is fixed and accent-free; the classification prompt instructs
/// the model to answer with one of these spellings verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// The subjects a classification is allowed to produce.
    pub const KNOWN: [&'static str; 4] = ["Espanol", "Matematicas", "Ciencias", "Social Studies"];

    /// Create a subject if `name` is one of the known set, `None` otherwise.
    pub fn try_known(name: &str) -> Option<Self> {
        Self::KNOWN
            .contains(&name)
            .then(|| Subject(name.to_string()))
    }

    /// Get the subject name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner name
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subjects_accepted() {
        for name in Subject::KNOWN {
            let subject = Subject::try_known(name).unwrap();
            assert_eq!(subject.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_subject_rejected() {
        assert!(Subject::try_known("Historia").is_none());
        // Accented spellings are not in the set
        assert!(Subject::try_known("Matemáticas").is_none());
        assert!(Subject::try_known("").is_none());
    }
}
