//! Prediction response schema

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response body for POST /predict. Transient, returned once per request.
///
/// `confidence` is the highest class probability; both it and every entry of
/// `class_probabilities` are rounded to 4 decimals, so the probabilities sum
/// to 1 only up to rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_category: String,
    pub confidence: f64,
    pub class_probabilities: BTreeMap<String, f64>,
}
