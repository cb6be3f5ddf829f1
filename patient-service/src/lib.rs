//! Patient Records API
//!
//! CRUD over patient records persisted in a single JSON file, with BMI and
//! a health verdict derived at creation time.
//!
//! Every request loads the full record set from disk; every mutation
//! rewrites the whole file. There is no locking: concurrent writers race on
//! the read-modify-write cycle and the last completed write wins.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put, delete},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
use store::PatientStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PatientStore>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/", get(handlers::health::home))
        .route("/about", get(handlers::health::about))
        .route("/view", get(handlers::patients::view_all))
        .route("/view/:id", get(handlers::patients::view_one))
        .route("/sort", get(handlers::patients::sort))
        .route("/create", post(handlers::patients::create))
        .route("/update/:id", put(handlers::patients::update))
        .route("/delete/:id", delete(handlers::patients::remove))
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
