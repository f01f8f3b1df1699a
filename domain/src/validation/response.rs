//! Raw response validation pipeline
//!
//! Turns the free-text output of a generation call into a
//! [`QuestionBatch`] or a [`ValidationError`] naming the first violated
//! constraint. Pure functions: no I/O, no state.
//!
//! Pipeline stages:
//! 1. Lenient pre-clean and JSON parse (`MalformedPayload`)
//! 2. Top-level shape check (`MissingField`)
//! 3. Option normalization (numbers stringified, whitespace trimmed)
//! 4. Per-item constraints (`InvalidQuestion` with the offending index)
//! 5. Batch count and tier distribution (`WrongCount`, `WrongDistribution`)

use crate::batch::{OPTION_COUNT, QuestionBatch};
use crate::core::question::{Difficulty, Question};
use crate::validation::ValidationError;
use serde_json::Value;

/// Slice `raw` down to the outermost JSON object.
///
/// Models wrap JSON in markdown fences or trail it with commentary often
/// enough that rejecting such responses outright would waste attempts.
/// Anything before the first `{` and after the last `}` is dropped; a
/// truncated object still fails the parse in [`validate_batch`].
pub fn extract_json_object(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MalformedPayload(
            "empty response".to_string(),
        ));
    }
    let start = trimmed
        .find('{')
        .ok_or_else(|| ValidationError::MalformedPayload("no JSON object found".to_string()))?;
    let end = trimmed
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| ValidationError::MalformedPayload("unterminated JSON object".to_string()))?;
    Ok(&trimmed[start..=end])
}

/// Validate a raw model response as a complete question batch.
///
/// On success the returned batch holds the items in response order,
/// unchanged apart from option normalization.
pub fn validate_batch(raw: &str) -> Result<QuestionBatch, ValidationError> {
    let object = extract_json_object(raw)?;
    let parsed: Value = serde_json::from_str(object)
        .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;

    let items = parsed
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingField("questions"))?;

    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        questions.push(validate_item(index, item)?);
    }

    QuestionBatch::new(questions)
}

fn validate_item(index: usize, item: &Value) -> Result<Question, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidQuestion { index, reason };

    let subject = non_empty_field(item, "subject").map_err(&invalid)?;
    let topic = non_empty_field(item, "topic").map_err(&invalid)?;
    let text = non_empty_field(item, "question").map_err(&invalid)?;

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("'options' must be an array".to_string()))?;
    if options.len() != OPTION_COUNT {
        return Err(invalid(format!(
            "expected {} options, got {}",
            OPTION_COUNT,
            options.len()
        )));
    }
    let options = options
        .iter()
        .map(normalize_option)
        .collect::<Result<Vec<_>, _>>()
        .map_err(&invalid)?;
    for (i, option) in options.iter().enumerate() {
        if options[..i].contains(option) {
            return Err(invalid(format!("duplicate option '{}'", option)));
        }
    }

    let correct_answer = item
        .get("correctAnswer")
        .and_then(Value::as_u64)
        .filter(|n| (*n as usize) < OPTION_COUNT)
        .ok_or_else(|| {
            invalid(format!(
                "'correctAnswer' must be an integer in 0..={}",
                OPTION_COUNT - 1
            ))
        })?;

    let difficulty = item
        .get("difficulty")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Difficulty>().ok())
        .ok_or_else(|| invalid("'difficulty' must be easy, medium or hard".to_string()))?;

    Ok(Question {
        subject,
        topic,
        text,
        options,
        correct_answer: correct_answer as usize,
        difficulty,
    })
}

fn non_empty_field(item: &Value, field: &str) -> Result<String, String> {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("'{}' must be a non-empty string", field))
}

/// Coerce one option value to its trimmed string form.
///
/// Numeric answer choices come back as JSON numbers despite the prompt
/// asking for strings; stringifying them here is normalization, not a
/// failure.
fn normalize_option(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err("options must be non-empty".to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("option must be a string, got {}", other)),
    }
}
