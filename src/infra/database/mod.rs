//! Concrete database client implementations.
//!
//! This module contains the SQLite adapter that implements the
//! `QuestionRepository` trait defined in the domain layer, plus the
//! migration source it is initialised with.

pub mod sqlite;

use sqlx::migrate::Migrator;

pub use sqlite::{SqliteConfig, SqliteQuestionRepository};

/// Schema migrations embedded from `./migrations` at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
