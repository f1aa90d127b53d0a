use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::ValidationError;

/// Errors a handler can answer with. Each becomes a JSON `{error, details?}` body.
#[derive(Debug)]
pub enum AppError {
    /// Request parameters failed validation.
    Input(String),
    /// Request body could not be read as the expected JSON.
    InvalidBody(String),
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Input(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, error, details) = match &self {
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message.as_str(), None),
            AppError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body",
                Some(details.as_str()),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found", None),
        };

        tracing::debug!("rejecting request with {code}: {error}");
        (code, Json(ErrorBody { error, details })).into_response()
    }
}
