//! Infrastructure layer for quizsmith
//!
//! This crate contains the adapters behind the application ports: the
//! OpenAI-compatible model client, the SQLite question repository, and
//! the configuration loader.

pub mod config;
pub mod openai;
pub mod persistence;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use openai::{OpenAiConfig, OpenAiError, OpenAiModelClient};
pub use persistence::SqliteQuestionRepository;
