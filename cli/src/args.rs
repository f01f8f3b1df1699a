//! Command-line interface definition

use clap::{Parser, Subcommand};
use quizsmith_domain::Difficulty;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quizsmith",
    version,
    about = "Generate, store and browse multiple-choice quiz questions"
)]
pub struct Cli {
    /// Path to a config file (takes priority over discovered configs)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a learning objective and generate a stored question batch
    Generate {
        /// The learning objective, as free text
        description: String,

        /// Print the stored questions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored questions in randomized order
    List {
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        topic: Option<String>,

        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Maximum number of questions to return
        #[arg(long)]
        limit: Option<u32>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the subjects the classifier may produce
    Subjects,

    /// List distinct topics, optionally narrowed to one subject
    Topics {
        #[arg(long)]
        subject: Option<String>,
    },

    /// Replace the fields of a stored question
    Edit {
        id: i64,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        topic: String,

        /// The question text
        #[arg(long)]
        question: String,

        /// The four answer options, comma separated
        #[arg(long, value_delimiter = ',')]
        options: Vec<String>,

        /// Index of the correct option (0-3)
        #[arg(long)]
        correct: usize,

        /// easy, medium or hard
        #[arg(long)]
        difficulty: Difficulty,
    },

    /// Delete a stored question
    Delete { id: i64 },
}
