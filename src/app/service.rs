//! Application service layer.
//!
//! Thin use-case layer between the HTTP boundary and the repository. Reads
//! degrade to an empty list on failure; writes always propagate their error.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::{AppError, Question, QuestionRepository};

/// Question use cases backed by a [`QuestionRepository`].
///
/// # Example
///
/// ```ignore
/// let repo = Arc::new(SqliteQuestionRepository::with_defaults(&url).await?);
/// let service = QuestionService::new(repo);
///
/// service.add(&question).await?;
/// let all = service.get_all().await;
/// ```
pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Returns every stored question, or an empty list if the read fails.
    ///
    /// The failure is logged and swallowed so that the list endpoint always
    /// answers; callers cannot tell "no questions" from "storage down".
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Vec<Question> {
        match self.repository.get_all().await {
            Ok(questions) => questions,
            Err(e) => {
                warn!(error = %e, "Failed to get all questions, returning empty list");
                Vec::new()
            }
        }
    }

    /// Stores a new question with its options.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged, e.g. a duplicate id.
    #[instrument(skip(self, question), fields(question_id = question.id))]
    pub async fn add(&self, question: &Question) -> Result<(), AppError> {
        self.repository
            .add(question)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to add question"))?;
        info!("Question created");
        Ok(())
    }

    /// Replaces an existing question's body and options.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the id is unknown, or any storage error.
    #[instrument(skip(self, question), fields(question_id = question.id))]
    pub async fn update(&self, question: &Question) -> Result<(), AppError> {
        self.repository
            .update(question)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to update question"))?;
        info!("Question updated");
        Ok(())
    }
}
