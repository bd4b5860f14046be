//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError, ValidationError};
pub use traits::QuestionRepository;
pub use types::{ErrorDetail, ErrorResponse, Question, QuestionId, QuestionOption};
