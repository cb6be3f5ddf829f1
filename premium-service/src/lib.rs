//! Insurance Premium Prediction API
//!
//! Thin HTTP wrapper around a pre-trained premium-category classifier. The
//! classifier artifact is loaded once at startup and treated as an opaque
//! black box behind the [`engine::Classifier`] trait; the service only
//! validates the request, builds a feature row and relays the model's
//! probability output.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

use engine::PremiumModel;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<PremiumModel>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/", get(handlers::health::home))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
