//! Health, welcome and about handlers

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    version: &'static str,
    timestamp: i64,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "The API is healthy!",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Welcome to the Patient API!"
    }))
}

pub async fn about() -> Json<Value> {
    Json(json!({
        "name": "Patient API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "An API to manage patient data including BMI and health verdicts."
    }))
}
