//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileConfig, FileDatabaseConfig, FileModelConfig, FilePromptConfig, FileRetryConfig,
};
pub use loader::ConfigLoader;
