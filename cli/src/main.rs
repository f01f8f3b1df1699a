//! CLI entrypoint for quizsmith
//!
//! This is the binary that wires together all layers using dependency
//! injection: the SQLite repository and the OpenAI adapter from the
//! infrastructure layer are injected into the application use cases.

mod args;

use anyhow::{Context, Result, bail};
use args::{Cli, Command};
use clap::Parser;
use quizsmith_application::{
    ClassifyObjectiveUseCase, CreateQuestionSetUseCase, GenerateBatchUseCase, QuestionFilter,
    QuestionRepository,
};
use quizsmith_domain::{OPTION_COUNT, Question, StoredQuestion, Subject};
use quizsmith_infrastructure::{ConfigLoader, OpenAiModelClient, SqliteQuestionRepository};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref())?;
    let repository = Arc::new(SqliteQuestionRepository::open(&config.database.path)?);

    match cli.command {
        Command::Generate { description, json } => {
            let api_key = ConfigLoader::api_key_from_env().context("OPENAI_API_KEY is not set")?;
            let model_client = Arc::new(OpenAiModelClient::new(config.openai(api_key))?);

            // Ctrl-C aborts between attempts and during backoff waits
            let token = CancellationToken::new();
            {
                let token = token.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        token.cancel();
                    }
                });
            }

            let use_case = CreateQuestionSetUseCase::new(
                ClassifyObjectiveUseCase::new(model_client.clone()),
                GenerateBatchUseCase::new(model_client)
                    .with_profile(config.prompt.to_profile())
                    .with_retry_policy(config.retry.to_policy())
                    .with_cancellation_token(token),
                repository.clone(),
            );

            info!("generating question set");
            let stored = use_case.execute(&description).await?;
            print_questions(&stored, json)?;
        }

        Command::List {
            subject,
            topic,
            difficulty,
            limit,
            json,
        } => {
            let filter = QuestionFilter {
                subject,
                topic,
                difficulty,
                limit,
            };
            let rows = repository.list(&filter).await?;
            if rows.is_empty() {
                println!("No se encontraron preguntas");
            } else {
                print_questions(&rows, json)?;
            }
        }

        Command::Subjects => {
            for subject in Subject::KNOWN {
                println!("{}", subject);
            }
        }

        Command::Topics { subject } => {
            for topic in repository.topics(subject.as_deref()).await? {
                println!("{}", topic);
            }
        }

        Command::Edit {
            id,
            subject,
            topic,
            question,
            options,
            correct,
            difficulty,
        } => {
            if options.len() != OPTION_COUNT {
                bail!(
                    "se requieren exactamente {} opciones, se recibieron {}",
                    OPTION_COUNT,
                    options.len()
                );
            }
            if correct >= OPTION_COUNT {
                bail!("--correct debe estar entre 0 y {}", OPTION_COUNT - 1);
            }
            let question = Question {
                subject,
                topic,
                text: question,
                options,
                correct_answer: correct,
                difficulty,
            };
            let updated = repository.update(id, &question).await?;
            print_questions(std::slice::from_ref(&updated), false)?;
        }

        Command::Delete { id } => {
            repository.delete(id).await?;
            println!("Pregunta {} eliminada", id);
        }
    }

    Ok(())
}

fn print_questions(questions: &[StoredQuestion], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(questions)?);
        return Ok(());
    }
    for stored in questions {
        println!(
            "#{} [{}] {} / {}",
            stored.id, stored.question.difficulty, stored.question.subject, stored.question.topic
        );
        println!("  {}", stored.question.text);
        for (i, option) in stored.question.options.iter().enumerate() {
            let marker = if i == stored.question.correct_answer {
                "*"
            } else {
                " "
            };
            println!("  {} {}) {}", marker, i, option);
        }
        println!();
    }
    Ok(())
}
