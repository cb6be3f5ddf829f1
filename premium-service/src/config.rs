//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the ONNX classifier artifact
    pub model_path: String,

    /// Path to the model metadata sidecar (version, class labels)
    pub model_meta_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "model/premium_classifier.onnx".to_string()),

            model_meta_path: env::var("MODEL_META_PATH")
                .unwrap_or_else(|_| "model/premium_classifier.json".to_string()),
        }
    }
}
