//! SQLite question repository

use async_trait::async_trait;
use chrono::Utc;
use quizsmith_application::ports::question_store::{
    QuestionFilter, QuestionRepository, RepositoryError,
};
use quizsmith_domain::{Difficulty, Question, StoredQuestion};
use rusqlite::{Connection, Row, ToSql, params};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

const COLUMNS: &str =
    "id, subject, topic, learning_objective, question, options, correct_answer, difficulty, created_at";

/// [`QuestionRepository`] backed by a single SQLite database file.
///
/// rusqlite connections are not Sync, so the connection sits behind an
/// async mutex; the flat single-table workload never holds it across an
/// await point other than its own queries.
pub struct SqliteQuestionRepository {
    conn: Mutex<Connection>,
}

impl SqliteQuestionRepository {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let conn = Connection::open(path).map_err(storage)?;
        Self::with_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, RepositoryError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject TEXT NOT NULL,
                topic TEXT NOT NULL,
                learning_objective TEXT NOT NULL,
                question TEXT NOT NULL,
                options TEXT NOT NULL,
                correct_answer INTEGER NOT NULL,
                difficulty TEXT NOT NULL DEFAULT 'medium',
                created_at TEXT NOT NULL
            )",
        )
        .map_err(storage)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn storage(error: rusqlite::Error) -> RepositoryError {
    RepositoryError::Storage(error.to_string())
}

fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredQuestion> {
    let options_json: String = row.get(5)?;
    let options: Vec<String> = serde_json::from_str(&options_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let difficulty: String = row.get(7)?;
    let difficulty: Difficulty = difficulty.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;
    Ok(StoredQuestion {
        id: row.get(0)?,
        learning_objective: row.get(3)?,
        created_at: row.get(8)?,
        question: Question {
            subject: row.get(1)?,
            topic: row.get(2)?,
            text: row.get(4)?,
            options,
            correct_answer: row.get::<_, i64>(6)? as usize,
            difficulty,
        },
    })
}

#[async_trait]
impl QuestionRepository for SqliteQuestionRepository {
    async fn insert(
        &self,
        question: &Question,
        learning_objective: &str,
    ) -> Result<StoredQuestion, RepositoryError> {
        let options = serde_json::to_string(&question.options)
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        let created_at = Utc::now().to_rfc3339();

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO questions (subject, topic, learning_objective, question, options, correct_answer, difficulty, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                question.subject,
                question.topic,
                learning_objective,
                question.text,
                options,
                question.correct_answer as i64,
                question.difficulty.as_str(),
                created_at,
            ],
        )
        .map_err(storage)?;
        let id = conn.last_insert_rowid();
        debug!(id, "question stored");

        Ok(StoredQuestion {
            id,
            learning_objective: learning_objective.to_string(),
            created_at,
            question: question.clone(),
        })
    }

    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<StoredQuestion>, RepositoryError> {
        let mut sql = format!("SELECT {} FROM questions", COLUMNS);
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql + Send>> = Vec::new();

        if let Some(subject) = &filter.subject {
            conditions.push("subject = ?");
            values.push(Box::new(subject.clone()));
        }
        if let Some(topic) = &filter.topic {
            conditions.push("topic = ?");
            values.push(Box::new(topic.clone()));
        }
        if let Some(difficulty) = filter.difficulty {
            conditions.push("difficulty = ?");
            values.push(Box::new(difficulty.as_str()));
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        // Randomized order so a limited read doubles as quiz assembly
        sql.push_str(" ORDER BY RANDOM()");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            values.push(Box::new(limit as i64));
        }

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&sql).map_err(storage)?;
        let rows = stmt
            .query_map(
                rusqlite::params_from_iter(values.iter().map(|v| &**v)),
                row_to_stored,
            )
            .map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    async fn update(
        &self,
        id: i64,
        question: &Question,
    ) -> Result<StoredQuestion, RepositoryError> {
        let options = serde_json::to_string(&question.options)
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let conn = self.conn.lock().await;
        let changes = conn
            .execute(
                "UPDATE questions
                 SET subject = ?1, topic = ?2, question = ?3, options = ?4, correct_answer = ?5, difficulty = ?6
                 WHERE id = ?7",
                params![
                    question.subject,
                    question.topic,
                    question.text,
                    options,
                    question.correct_answer as i64,
                    question.difficulty.as_str(),
                    id,
                ],
            )
            .map_err(storage)?;
        if changes == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        conn.query_row(
            &format!("SELECT {} FROM questions WHERE id = ?1", COLUMNS),
            params![id],
            row_to_stored,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound(id),
            other => storage(other),
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let conn = self.conn.lock().await;
        let changes = conn
            .execute("DELETE FROM questions WHERE id = ?1", params![id])
            .map_err(storage)?;
        if changes == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn topics(&self, subject: Option<&str>) -> Result<Vec<String>, RepositoryError> {
        let conn = self.conn.lock().await;
        match subject {
            Some(subject) => {
                let mut stmt = conn
                    .prepare(
                        "SELECT DISTINCT topic FROM questions WHERE subject = ?1 ORDER BY topic",
                    )
                    .map_err(storage)?;
                let rows = stmt
                    .query_map(params![subject], |row| row.get::<_, String>(0))
                    .map_err(storage)?;
                rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
            }
            None => {
                let mut stmt = conn
                    .prepare("SELECT DISTINCT topic FROM questions ORDER BY topic")
                    .map_err(storage)?;
                let rows = stmt
                    .query_map([], |row| row.get::<_, String>(0))
                    .map_err(storage)?;
                rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(subject: &str, topic: &str, difficulty: Difficulty, n: usize) -> Question {
        Question {
            subject: subject.to_string(),
            topic: topic.to_string(),
            text: format!("Pregunta {}", n),
            options: vec![
                "uno".to_string(),
                "dos".to_string(),
                "tres".to_string(),
                "cuatro".to_string(),
            ],
            correct_answer: n % 4,
            difficulty,
        }
    }

    async fn seeded_repository() -> SqliteQuestionRepository {
        let repository = SqliteQuestionRepository::open_in_memory().unwrap();
        let rows = [
            ("Ciencias", "Plantas", Difficulty::Easy),
            ("Ciencias", "Plantas", Difficulty::Hard),
            ("Ciencias", "Animales", Difficulty::Medium),
            ("Matematicas", "Fracciones", Difficulty::Easy),
        ];
        for (n, (subject, topic, difficulty)) in rows.into_iter().enumerate() {
            repository
                .insert(&question(subject, topic, difficulty, n), "objetivo")
                .await
                .unwrap();
        }
        repository
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repository = SqliteQuestionRepository::open_in_memory().unwrap();
        let first = repository
            .insert(&question("Ciencias", "Plantas", Difficulty::Easy, 0), "foto")
            .await
            .unwrap();
        let second = repository
            .insert(&question("Ciencias", "Plantas", Difficulty::Easy, 1), "foto")
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.learning_objective, "foto");
    }

    #[tokio::test]
    async fn test_options_round_trip() {
        let repository = SqliteQuestionRepository::open_in_memory().unwrap();
        let original = question("Espanol", "Acentos", Difficulty::Medium, 2);
        repository.insert(&original, "acentos").await.unwrap();

        let listed = repository.list(&QuestionFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].question, original);
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let repository = seeded_repository().await;

        let by_subject = repository
            .list(&QuestionFilter::default().with_subject("Ciencias"))
            .await
            .unwrap();
        assert_eq!(by_subject.len(), 3);

        let by_subject_and_topic = repository
            .list(
                &QuestionFilter::default()
                    .with_subject("Ciencias")
                    .with_topic("Plantas"),
            )
            .await
            .unwrap();
        assert_eq!(by_subject_and_topic.len(), 2);

        let hard_only = repository
            .list(&QuestionFilter::default().with_difficulty(Difficulty::Hard))
            .await
            .unwrap();
        assert_eq!(hard_only.len(), 1);
        assert_eq!(hard_only[0].question.difficulty, Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let repository = seeded_repository().await;
        let limited = repository
            .list(&QuestionFilter::default().with_limit(2))
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repository = seeded_repository().await;
        let replacement = question("Ciencias", "Hongos", Difficulty::Hard, 3);
        let updated = repository.update(1, &replacement).await.unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.question.topic, "Hongos");
        assert_eq!(updated.question.difficulty, Difficulty::Hard);

        let missing = repository.update(999, &replacement).await.unwrap_err();
        assert!(matches!(missing, RepositoryError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repository = seeded_repository().await;
        repository.delete(1).await.unwrap();
        let remaining = repository.list(&QuestionFilter::default()).await.unwrap();
        assert_eq!(remaining.len(), 3);

        let missing = repository.delete(1).await.unwrap_err();
        assert!(matches!(missing, RepositoryError::NotFound(1)));
    }

    #[tokio::test]
    async fn test_topics_distinct_and_sorted() {
        let repository = seeded_repository().await;
        let all = repository.topics(None).await.unwrap();
        assert_eq!(all, vec!["Animales", "Fracciones", "Plantas"]);

        let ciencias = repository.topics(Some("Ciencias")).await.unwrap();
        assert_eq!(ciencias, vec!["Animales", "Plantas"]);
    }

    #[tokio::test]
    async fn test_reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.db");
        {
            let repository = SqliteQuestionRepository::open(&path).unwrap();
            repository
                .insert(&question("Ciencias", "Plantas", Difficulty::Easy, 0), "foto")
                .await
                .unwrap();
        }
        let reopened = SqliteQuestionRepository::open(&path).unwrap();
        let rows = reopened.list(&QuestionFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
