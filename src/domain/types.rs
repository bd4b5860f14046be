use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client-supplied identifier of a question.
pub type QuestionId = i64;

/// A multiple-choice question together with its ordered options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Question {
    #[validate(custom(function = "validate_id_present"))]
    pub id: QuestionId,
    #[validate(length(min = 1, max = 255))]
    pub body: String,
    #[validate(length(min = 2, max = 10), nested)]
    pub options: Vec<QuestionOption>,
}

/// Zero is what an absent `id` decodes to, so it is the only rejected value.
fn validate_id_present(id: &QuestionId) -> Result<(), validator::ValidationError> {
    if *id == 0 {
        return Err(validator::ValidationError::new("required")
            .with_message("id must be non-zero".into()));
    }
    Ok(())
}

impl Question {
    pub fn new(id: QuestionId, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, body: impl Into<String>, correct: bool) -> Self {
        self.options.push(QuestionOption::new(body, correct));
        self
    }

    pub fn with_options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }
}

/// A possible answer to a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct QuestionOption {
    #[validate(length(min = 1, max = 255))]
    pub body: String,
    #[serde(default)]
    pub correct: bool,
}

impl QuestionOption {
    pub fn new(body: impl Into<String>, correct: bool) -> Self {
        Self {
            body: body.into(),
            correct,
        }
    }
}

/// Error payload returned for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub r#type: String,
    pub message: String,
}
