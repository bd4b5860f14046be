//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::domain::QuestionRepository;

use super::service::QuestionService;

/// Shared application state for the Axum web server.
///
/// Handlers only reach storage through the service, which holds the
/// repository as an `Arc`-wrapped trait object.
#[derive(Clone)]
pub struct AppState {
    /// Question use cases.
    pub service: Arc<QuestionService>,
}

impl AppState {
    /// Creates a new `AppState`, wiring a `QuestionService` to `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self {
            service: Arc::new(QuestionService::new(repository)),
        }
    }
}
