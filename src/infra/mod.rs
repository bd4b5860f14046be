//! Infrastructure layer implementations.

pub mod database;
pub mod observability;

pub use database::{MIGRATOR, SqliteConfig, SqliteQuestionRepository};
pub use observability::{LogFormat, init_tracing};
