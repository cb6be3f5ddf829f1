//! Prediction handler

use axum::{extract::State, Json};

use crate::{AppState, AppError, AppResult};
use crate::models::{PredictionResponse, UserInput};

/// Predict the insurance premium category for one applicant
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> AppResult<Json<PredictionResponse>> {
    input.validate().map_err(AppError::Validation)?;

    let response = state.model.predict(&input)?;
    tracing::debug!(
        "Predicted {} with confidence {}",
        response.predicted_category,
        response.confidence
    );

    Ok(Json(response))
}
