//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Inference(#[from] crate::engine::InferenceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::Inference(err) => {
                tracing::error!("Inference error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        if let AppError::Validation(details) = &self {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}
