//! Question Service
//!
//! A small HTTP service that stores multiple-choice questions and their
//! options in SQLite, with storage hidden behind a trait so every layer
//! can be tested in isolation.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │ extractors, handlers, routing, server loop   │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │      QuestionService, shared AppState        │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Question types, errors, repository trait   │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │   SQLite repository, migrations, tracing     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use question_service::api::{create_router, serve, shutdown_signal};
//! use question_service::app::AppState;
//! use question_service::infra::{MIGRATOR, SqliteQuestionRepository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = Arc::new(SqliteQuestionRepository::with_defaults("sqlite://questions.db").await?);
//!     repo.run_migrations(&MIGRATOR).await?;
//!
//!     let state = Arc::new(AppState::new(repo.clone()));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     serve(listener, create_router(state), shutdown_signal(), Duration::from_secs(10)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
