//! HTTP request handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::app::AppState;
use crate::domain::{AppError, DatabaseError, ErrorDetail, ErrorResponse, Question};

use super::extract::ValidatedJson;

/// Liveness probe; always 200 with an empty body
pub async fn status_handler() -> StatusCode {
    StatusCode::OK
}

/// Answers HEAD on GET routes, which axum would otherwise serve with the GET handler
pub async fn head_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

/// List all questions, newest id first
pub async fn list_questions_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Question>> {
    Json(state.service.get_all().await)
}

/// Create a question and echo it back
pub async fn create_question_handler(
    State(state): State<Arc<AppState>>,
    ValidatedJson(question): ValidatedJson<Question>,
) -> Result<Json<Question>, AppError> {
    state.service.add(&question).await?;
    Ok(Json(question))
}

/// Replace an existing question and echo it back
pub async fn update_question_handler(
    State(state): State<Arc<AppState>>,
    ValidatedJson(question): ValidatedJson<Question>,
) -> Result<Json<Question>, AppError> {
    state.service.update(&question).await?;
    Ok(Json(question))
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_type, message) = match &self {
            // Not found carries no body
            AppError::NotFound(_) => return StatusCode::NOT_FOUND.into_response(),
            AppError::Database(db_err) => match db_err {
                DatabaseError::Duplicate(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "duplicate",
                    self.to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    self.to_string(),
                ),
            },
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.to_string(),
            ),
            AppError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                self.to_string(),
            ),
            AppError::UnsupportedMediaType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_media_type",
                self.to_string(),
            ),
            AppError::Deserialization(_) => (
                StatusCode::BAD_REQUEST,
                "deserialization_error",
                self.to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                r#type: error_type.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
