//! OpenAI-compatible chat-completions adapter

pub mod client;
pub mod error;
pub mod types;

pub use client::{OpenAiConfig, OpenAiModelClient};
pub use error::OpenAiError;
