//! SQLite question repository implementation.

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::{
    AppError, DatabaseError, Question, QuestionId, QuestionOption, QuestionRepository,
};

/// SQLite connection pool configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub busy_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl SqliteConfig {
    /// Configuration for `sqlite::memory:` databases.
    ///
    /// An in-memory database lives as long as its connection, so the pool
    /// keeps exactly one connection open and never recycles it.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            max_lifetime: None,
            ..Self::default()
        }
    }
}

/// SQLite-backed question storage with connection pooling
pub struct SqliteQuestionRepository {
    pool: SqlitePool,
}

impl SqliteQuestionRepository {
    /// Open (creating if missing) the database at `database_url`
    pub async fn new(database_url: &str, config: SqliteConfig) -> Result<Self, AppError> {
        info!("Connecting to SQLite...");
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        info!("Connected to SQLite");
        Ok(Self { pool })
    }

    /// Open with default pool configuration
    pub async fn with_defaults(database_url: &str) -> Result<Self, AppError> {
        Self::new(database_url, SqliteConfig::default()).await
    }

    /// Apply the given migration source to this database
    pub async fn run_migrations(&self, migrator: &Migrator) -> Result<(), AppError> {
        info!("Running database migrations...");
        migrator.run(&self.pool).await?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Close every pooled connection, waiting for checked-out ones to return
    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite connection pool closed");
    }

    /// Get the underlying connection pool (for testing)
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fold question/option join rows into domain values.
    ///
    /// Rows must be ordered by question id, then option id, so every
    /// question's rows are contiguous.
    fn rows_to_questions(rows: &[SqliteRow]) -> Result<Vec<Question>, AppError> {
        let mut questions: Vec<Question> = Vec::new();

        for row in rows {
            let question_id: QuestionId = row.try_get("question_id")?;
            if questions.last().is_none_or(|last| last.id != question_id) {
                let body: String = row.try_get("question_body")?;
                questions.push(Question::new(question_id, body));
            }
            let Some(question) = questions.last_mut() else {
                continue;
            };

            // LEFT JOIN yields NULL option columns for questions with no options
            let option_body: Option<String> = row.try_get("option_body")?;
            if let Some(body) = option_body {
                let correct: bool = row.try_get("option_correct")?;
                question.options.push(QuestionOption { body, correct });
            }
        }

        Ok(questions)
    }

    async fn insert_options(
        conn: &mut SqliteConnection,
        question_id: QuestionId,
        options: &[QuestionOption],
    ) -> Result<(), AppError> {
        if options.is_empty() {
            return Ok(());
        }

        // A single multi-row insert keeps the autoincrement ids in list order
        let mut builder =
            QueryBuilder::<Sqlite>::new(r#"INSERT INTO "option" (body, correct, question_id) "#);
        builder.push_values(options.iter(), |mut b, option| {
            b.push_bind(option.body.as_str())
                .push_bind(option.correct)
                .push_bind(question_id);
        });
        builder.build().execute(&mut *conn).await?;

        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for SqliteQuestionRepository {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT q.id AS question_id,
                   q.body AS question_body,
                   o.body AS option_body,
                   o.correct AS option_correct
            FROM question q
            LEFT JOIN "option" o ON o.question_id = q.id
            ORDER BY q.id DESC, o.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Self::rows_to_questions(&rows)
    }

    #[instrument(skip(self, question), fields(question_id = question.id))]
    async fn add(&self, question: &Question) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(DatabaseError::Transaction(e.to_string())))?;

        sqlx::query("INSERT INTO question (id, body) VALUES (?, ?)")
            .bind(question.id)
            .bind(&question.body)
            .execute(&mut *tx)
            .await?;

        Self::insert_options(&mut *tx, question.id, &question.options).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(DatabaseError::Transaction(e.to_string())))?;

        info!(options = question.options.len(), "Question added");
        Ok(())
    }

    #[instrument(skip(self, question), fields(question_id = question.id))]
    async fn update(&self, question: &Question) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(DatabaseError::Transaction(e.to_string())))?;

        let existing = sqlx::query("SELECT id FROM question WHERE id = ?")
            .bind(question.id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            tx.rollback()
                .await
                .map_err(|e| AppError::Database(DatabaseError::Transaction(e.to_string())))?;
            return Err(AppError::NotFound(format!("question {}", question.id)));
        }

        sqlx::query("UPDATE question SET body = ? WHERE id = ?")
            .bind(&question.body)
            .bind(question.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(r#"DELETE FROM "option" WHERE question_id = ?"#)
            .bind(question.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_options(&mut *tx, question.id, &question.options).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(DatabaseError::Transaction(e.to_string())))?;

        info!(options = question.options.len(), "Question updated");
        Ok(())
    }
}
