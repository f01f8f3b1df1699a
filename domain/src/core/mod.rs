//! Core entities and value objects

pub mod classification;
pub mod question;
pub mod subject;

pub use classification::Classification;
pub use question::{Difficulty, ParseDifficultyError, Question, StoredQuestion};
pub use subject::Subject;
