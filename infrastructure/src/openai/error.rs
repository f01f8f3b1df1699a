//! Error types for the OpenAI adapter

use thiserror::Error;

/// Errors that can occur when talking to the chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response contained no completion text")]
    EmptyCompletion,
}
