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
    #[error("{0}")]
    NotFound(String),

    // The source API reports duplicate ids as 400, not 409
    #[error("{0}")]
    AlreadyExists(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] crate::store::StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AlreadyExists(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error occurred".to_string())
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
