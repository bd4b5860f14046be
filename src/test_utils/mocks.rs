//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate success and storage failures.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    AppError, DatabaseError, Question, QuestionId, QuestionOption, QuestionRepository,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock question repository for testing.
///
/// Stores questions in an in-memory `BTreeMap` keyed by id and supports
/// configurable failure modes.
///
/// # Example
///
/// ```ignore
/// use question_service::test_utils::{MockQuestionRepository, mocks::MockConfig};
///
/// // Create a mock that succeeds
/// let mock = MockQuestionRepository::new();
///
/// // Create a mock that fails
/// let failing_mock = MockQuestionRepository::with_config(MockConfig::failure("DB error"));
/// ```
pub struct MockQuestionRepository {
    storage: Arc<Mutex<BTreeMap<QuestionId, (String, Vec<QuestionOption>)>>>,
    config: MockConfig,
    call_count: AtomicU64,
    is_healthy: AtomicBool,
}

impl MockQuestionRepository {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            storage: Arc::new(Mutex::new(BTreeMap::new())),
            config,
            call_count: AtomicU64::new(0),
            is_healthy: AtomicBool::new(true),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Gets all stored questions, newest id first, bypassing failure modes.
    pub fn get_all_questions(&self) -> Vec<Question> {
        self.storage
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|(id, (body, options))| Question {
                id: *id,
                body: body.clone(),
                options: options.clone(),
            })
            .collect()
    }

    fn increment_call_count(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock database error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockQuestionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionRepository for MockQuestionRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.increment_call_count();

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Database(DatabaseError::Connection(
                "Mock database unhealthy".to_string(),
            )));
        }

        self.check_should_fail()
    }

    async fn get_all(&self) -> Result<Vec<Question>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        Ok(self.get_all_questions())
    }

    async fn add(&self, question: &Question) -> Result<(), AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut storage = self.storage.lock().unwrap();
        if storage.contains_key(&question.id) {
            return Err(AppError::Database(DatabaseError::Duplicate(format!(
                "question {} already exists",
                question.id
            ))));
        }
        storage.insert(
            question.id,
            (question.body.clone(), question.options.clone()),
        );

        Ok(())
    }

    async fn update(&self, question: &Question) -> Result<(), AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut storage = self.storage.lock().unwrap();
        match storage.get_mut(&question.id) {
            Some(existing) => {
                *existing = (question.body.clone(), question.options.clone());
                Ok(())
            }
            None => Err(AppError::NotFound(format!("question {}", question.id))),
        }
    }
}
