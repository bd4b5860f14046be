//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::AppError;
use super::types::Question;

/// Persistence contract for questions and their options.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Check storage connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// All questions, newest id first, each with its options in insertion order
    async fn get_all(&self) -> Result<Vec<Question>, AppError>;

    /// Store a new question and its options atomically.
    ///
    /// Fails if a question with the same id already exists.
    async fn add(&self, question: &Question) -> Result<(), AppError>;

    /// Replace the body and the entire option set of an existing question.
    ///
    /// Returns `AppError::NotFound` when no question has this id; the store
    /// is left untouched in that case.
    async fn update(&self, question: &Question) -> Result<(), AppError>;
}
