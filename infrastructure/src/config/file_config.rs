//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and convert into the richer application/adapter types.

use crate::openai::OpenAiConfig;
use quizsmith_application::RetryPolicy;
use quizsmith_domain::PromptProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration file structure
///
/// # Example
///
/// ```toml
/// [model]
/// name = "gpt-4o-mini"
/// temperature = 0.5
///
/// [retry]
/// max_attempts = 3
/// base_delay_ms = 2000
///
/// [database]
/// path = "quiz.db"
///
/// [prompt]
/// language = "español"
/// audience = "estudiantes de primaria"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub model: FileModelConfig,
    pub retry: FileRetryConfig,
    pub database: FileDatabaseConfig,
    pub prompt: FilePromptConfig,
}

impl FileConfig {
    /// Assemble adapter settings. The API key comes from the
    /// environment, never from the config file.
    pub fn openai(&self, api_key: impl Into<String>) -> OpenAiConfig {
        let mut config = OpenAiConfig::new(api_key)
            .with_model(&self.model.name)
            .with_base_url(&self.model.base_url);
        config.temperature = self.model.temperature;
        config.max_tokens = self.model.max_tokens;
        config.timeout = Duration::from_secs(self.model.timeout_seconds);
        config
    }
}

/// `[model]` section: which model to call and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub name: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.5,
            max_tokens: 4000,
            timeout_seconds: 60,
        }
    }
}

/// `[retry]` section: attempt bound and backoff schedule, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rate_limit_base_delay_ms: u64,
    pub rate_limit_max_delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            max_delay_ms: policy.max_delay.as_millis() as u64,
            rate_limit_base_delay_ms: policy.rate_limit_base_delay.as_millis() as u64,
            rate_limit_max_delay_ms: policy.rate_limit_max_delay.as_millis() as u64,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            rate_limit_base_delay: Duration::from_millis(self.rate_limit_base_delay_ms),
            rate_limit_max_delay: Duration::from_millis(self.rate_limit_max_delay_ms),
        }
    }
}

/// `[database]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    pub path: String,
}

impl Default for FileDatabaseConfig {
    fn default() -> Self {
        Self {
            path: "quiz.db".to_string(),
        }
    }
}

/// `[prompt]` section: wording knobs for the generation prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    pub language: String,
    pub audience: String,
}

impl Default for FilePromptConfig {
    fn default() -> Self {
        let profile = PromptProfile::default();
        Self {
            language: profile.language,
            audience: profile.audience,
        }
    }
}

impl FilePromptConfig {
    pub fn to_profile(&self) -> PromptProfile {
        PromptProfile::default()
            .with_language(&self.language)
            .with_audience(&self.audience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_matches_policy_default() {
        assert_eq!(FileRetryConfig::default().to_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_to_policy_converts_milliseconds() {
        let config = FileRetryConfig {
            max_attempts: 5,
            base_delay_ms: 100,
            max_delay_ms: 400,
            rate_limit_base_delay_ms: 200,
            rate_limit_max_delay_ms: 800,
        };
        let policy = config.to_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
        assert_eq!(policy.rate_limit_max_delay, Duration::from_millis(800));
    }

    #[test]
    fn test_openai_assembly() {
        let mut file_config = FileConfig::default();
        file_config.model.name = "gpt-4o".to_string();
        file_config.model.timeout_seconds = 30;
        let openai = file_config.openai("sk-test");
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_prompt_profile_conversion() {
        let config = FilePromptConfig {
            language: "inglés".to_string(),
            audience: "secundaria".to_string(),
        };
        let profile = config.to_profile();
        assert_eq!(profile.language, "inglés");
        assert_eq!(profile.audience, "secundaria");
        // Structural numbers stay pinned to the batch invariants
        assert_eq!(profile.batch_size, quizsmith_domain::BATCH_SIZE);
    }
}
