//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode, header},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::{AppError, ValidationError};

/// JSON body that has been decoded and validated.
///
/// Checks run in a fixed order: a body within the size limit (413), a
/// non-empty body (400), an `application/json` content type (415), a
/// decodable payload (400), and finally the `Validate` rules of `T` (400).
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::Deserialization(e.body_text())
            }
        })?;

        if bytes.is_empty() {
            return Err(ValidationError::MissingBody.into());
        }

        if let Err(found) = content_type {
            return Err(AppError::UnsupportedMediaType(found));
        }

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Deserialization(format!("failed to decode json body: {e}")))?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// `Ok` for `application/json` (parameters like `charset` allowed),
/// otherwise the offending content type for the error message.
fn json_content_type(headers: &HeaderMap) -> Result<(), String> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Err("missing content type".to_string());
    };
    let raw = value
        .to_str()
        .map_err(|_| "unreadable content type".to_string())?;

    let essence = raw.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        Err(raw.to_string())
    }
}
