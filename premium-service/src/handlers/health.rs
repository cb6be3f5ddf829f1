//! Health and welcome handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    model_loaded: bool,
    model_version: String,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "The API is healthy!",
        // The process cannot start without the artifact
        model_loaded: true,
        model_version: state.model.version().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Welcome to the Insurance Premium Prediction API!"
    }))
}
