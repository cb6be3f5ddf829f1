//! ONNX-backed classifier
//!
//! Loads the serialized artifact with ONNX Runtime plus a JSON metadata
//! sidecar carrying the model version and the class labels in probability
//! output order. The session requires exclusive access to run, so it sits
//! behind a mutex.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;
use serde::Deserialize;

use super::{Classifier, FeatureRow, InferenceError, FEATURE_COUNT};

/// Metadata sidecar written by the training pipeline next to the .onnx file
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMeta {
    pub model_version: String,
    pub class_labels: Vec<String>,
}

pub struct OnnxClassifier {
    session: Mutex<Session>,
    meta: ModelMeta,
    output_name: String,
}

impl OnnxClassifier {
    pub fn load(model_path: &str, meta_path: &str) -> Result<Self, InferenceError> {
        tracing::info!("Loading ONNX model from: {}", model_path);

        if !Path::new(model_path).exists() {
            return Err(InferenceError(format!("Model not found: {}", model_path)));
        }

        let meta_raw = fs::read_to_string(meta_path)
            .map_err(|e| InferenceError(format!("Failed to read model metadata {}: {}", meta_path, e)))?;
        let meta: ModelMeta = serde_json::from_str(&meta_raw)
            .map_err(|e| InferenceError(format!("Invalid model metadata: {}", e)))?;
        if meta.class_labels.is_empty() {
            return Err(InferenceError("Model metadata lists no class labels".to_string()));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        // sklearn-converted classifiers expose a "probabilities" output;
        // otherwise fall back to the last output
        let output_name = session.outputs.iter()
            .find(|o| o.name == "probabilities")
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("Model has no outputs".to_string()))?;

        tracing::info!(
            "ONNX model loaded: version {}, {} classes",
            meta.model_version,
            meta.class_labels.len()
        );

        Ok(Self {
            session: Mutex::new(session),
            meta,
            output_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn class_labels(&self) -> &[String] {
        &self.meta.class_labels
    }

    fn model_version(&self) -> &str {
        &self.meta.model_version
    }

    fn class_probabilities(&self, row: &FeatureRow) -> Result<Vec<f32>, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row.to_vec())
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| InferenceError("No probabilities output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        probabilities_from_output(output_tensor.1, self.meta.class_labels.len())
    }
}

/// A probability row that is not exactly one value per class means the
/// artifact and the metadata sidecar disagree.
fn probabilities_from_output(data: &[f32], n_classes: usize) -> Result<Vec<f32>, InferenceError> {
    if data.len() != n_classes {
        return Err(InferenceError(format!(
            "model returned {} probabilities for {} labels",
            data.len(),
            n_classes
        )));
    }
    Ok(data.to_vec())
}
