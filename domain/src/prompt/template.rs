//! Prompt construction for classification and generation
//!
//! One parameterized [`PromptProfile`] replaces per-variant prompt code:
//! language, audience and the batch-shape numbers are injected, and the
//! orchestrator never hardcodes prompt text.

use crate::batch::{BATCH_SIZE, OPTION_COUNT, QUESTIONS_PER_TIER};
use crate::core::classification::Classification;
use crate::core::question::Difficulty;
use crate::core::subject::Subject;
use crate::prompt::message::PromptMessage;
use serde::{Deserialize, Serialize};

/// Parameters that shape generated prompts.
///
/// The defaults target Spanish-language primary-school material; the
/// structural numbers come from the batch invariants, so a profile can
/// only reword the request, not change what the validator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptProfile {
    /// Language every generated text must use.
    pub language: String,
    /// Audience description used when the classification has no grade level.
    pub audience: String,
    pub batch_size: usize,
    pub questions_per_tier: usize,
    pub option_count: usize,
}

impl Default for PromptProfile {
    fn default() -> Self {
        Self {
            language: "español".to_string(),
            audience: "estudiantes de primaria".to_string(),
            batch_size: BATCH_SIZE,
            questions_per_tier: QUESTIONS_PER_TIER,
            option_count: OPTION_COUNT,
        }
    }
}

impl PromptProfile {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Build the full message sequence for one generation attempt:
    /// system context, user instructions, and a one-item assistant
    /// example pinning the output shape.
    pub fn generation_messages(
        &self,
        description: &str,
        classification: &Classification,
    ) -> Vec<PromptMessage> {
        vec![
            self.system_message(classification),
            self.user_message(description, classification),
            self.example_message(classification),
        ]
    }

    fn system_message(&self, classification: &Classification) -> PromptMessage {
        let audience = classification
            .grade_level
            .as_deref()
            .unwrap_or(&self.audience);
        PromptMessage::system(format!(
            "Eres un experto educador especializado en crear preguntas de opción múltiple \
             para {audience}.\n\n\
             ENFOQUE PRINCIPAL:\n\
             - Materia: {subject}\n\
             - Tema: {topic}\n\n\
             REQUISITOS CLAVE:\n\
             1. Genera EXACTAMENTE {count} preguntas en {language}\n\
             2. Adapta el lenguaje al nivel educativo\n\
             3. Haz preguntas claras y específicas\n\
             4. Proporciona opciones plausibles pero distinguibles",
            audience = audience,
            subject = classification.subject,
            topic = classification.topic,
            count = self.batch_size,
            language = self.language,
        ))
    }

    fn user_message(&self, description: &str, classification: &Classification) -> PromptMessage {
        let tiers = Difficulty::ALL
            .iter()
            .map(Difficulty::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        PromptMessage::user(format!(
            "Genera {count} preguntas de opción múltiple sobre:\n\
             \"{description}\"\n\n\
             ESTRUCTURA JSON REQUERIDA:\n{shape}\n\n\
             REQUISITOS:\n\
             1. Todo el texto en {language}\n\
             2. {per_tier} preguntas de cada nivel: {tiers}\n\
             3. Exactamente {options} opciones claras y distintas por pregunta\n\
             4. Una sola respuesta correcta, con correctAnswer entre 0 y {max_index}\n\
             5. Si una opción es un número, escríbela como cadena de texto\n\
             6. Sin texto fuera del JSON",
            count = self.batch_size,
            description = description,
            shape = self.shape_snippet(classification),
            language = self.language,
            per_tier = self.questions_per_tier,
            tiers = tiers,
            options = self.option_count,
            max_index = self.option_count - 1,
        ))
    }

    fn example_message(&self, classification: &Classification) -> PromptMessage {
        PromptMessage::assistant(self.shape_snippet(classification))
    }

    fn shape_snippet(&self, classification: &Classification) -> String {
        format!(
            "{{\n\
             \x20 \"questions\": [\n\
             \x20   {{\n\
             \x20     \"subject\": \"{subject}\",\n\
             \x20     \"topic\": \"{topic}\",\n\
             \x20     \"question\": \"¿Dónde se encuentra...?\",\n\
             \x20     \"options\": [\"Opción A\", \"Opción B\", \"Opción C\", \"Opción D\"],\n\
             \x20     \"correctAnswer\": 0,\n\
             \x20     \"difficulty\": \"easy\"\n\
             \x20   }}\n\
             \x20 ]\n\
             }}",
            subject = classification.subject,
            topic = classification.topic,
        )
    }
}

/// Build the single-message prompt that classifies a learning objective
/// into `{subject, topic}`.
///
/// The subject list is spelled out verbatim; the classifier is told to
/// reply with one of those spellings and nothing outside the JSON.
pub fn classification_messages(description: &str) -> Vec<PromptMessage> {
    let subjects = Subject::KNOWN.join(", ");
    vec![PromptMessage::user(format!(
        "Analiza el siguiente texto y clasifica la materia y el tema.\n\
         IMPORTANTE: La materia DEBE ser EXACTAMENTE una de estas: {subjects}.\n\
         No uses tildes ni caracteres especiales en las materias.\n\n\
         Texto: \"{description}\"\n\n\
         Responde solo con un objeto JSON con este formato exacto:\n\
         {{\n\
         \x20 \"subject\": \"una de las materias válidas exactamente como están escritas arriba\",\n\
         \x20 \"topic\": \"tema específico del texto\"\n\
         }}",
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification() -> Classification {
        Classification::new(Subject::try_known("Ciencias").unwrap(), "El ciclo del agua")
    }

    #[test]
    fn test_generation_messages_shape() {
        let messages =
            PromptProfile::default().generation_messages("el ciclo del agua", &classification());
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role.as_str(), "system");
        assert_eq!(messages[1].role.as_str(), "user");
        assert_eq!(messages[2].role.as_str(), "assistant");
    }

    #[test]
    fn test_messages_state_the_batch_contract() {
        let messages =
            PromptProfile::default().generation_messages("el ciclo del agua", &classification());
        let user = &messages[1].content;
        // The contract the validator will enforce must be spelled out
        assert!(user.contains("9 preguntas"));
        assert!(user.contains("3 preguntas de cada nivel"));
        assert!(user.contains("easy, medium, hard"));
        assert!(user.contains("4 opciones"));
        assert!(user.contains("entre 0 y 3"));
        assert!(user.contains("como cadena de texto"));
        assert!(user.contains("español"));
    }

    #[test]
    fn test_classification_carries_into_prompts() {
        let messages =
            PromptProfile::default().generation_messages("el ciclo del agua", &classification());
        assert!(messages[0].content.contains("Ciencias"));
        assert!(messages[0].content.contains("El ciclo del agua"));
        assert!(messages[2].content.contains("\"subject\": \"Ciencias\""));
    }

    #[test]
    fn test_grade_level_overrides_audience() {
        let with_grade = classification().with_grade_level("3er grado");
        let messages = PromptProfile::default().generation_messages("fracciones", &with_grade);
        assert!(messages[0].content.contains("3er grado"));
        assert!(!messages[0].content.contains("estudiantes de primaria"));
    }

    #[test]
    fn test_example_message_is_valid_json() {
        let messages =
            PromptProfile::default().generation_messages("el ciclo del agua", &classification());
        let parsed: serde_json::Value = serde_json::from_str(&messages[2].content).unwrap();
        assert!(parsed["questions"].is_array());
    }

    #[test]
    fn test_classification_prompt_lists_subjects() {
        let messages = classification_messages("los ríos de México");
        assert_eq!(messages.len(), 1);
        for subject in Subject::KNOWN {
            assert!(messages[0].content.contains(subject));
        }
        assert!(messages[0].content.contains("los ríos de México"));
    }
}
