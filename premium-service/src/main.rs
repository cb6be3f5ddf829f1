//! Insurance Premium Prediction API server binary

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use premium_service::{AppState, create_router};
use premium_service::config::Config;
use premium_service::engine::{OnnxClassifier, PremiumModel};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "premium_service=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Insurance Premium Prediction API starting...");
    tracing::info!("Model artifact: {}", config.model_path);

    // A missing or incompatible artifact means the process cannot serve
    let classifier = OnnxClassifier::load(&config.model_path, &config.model_meta_path)
        .expect("Failed to load classifier artifact");

    let state = AppState {
        model: Arc::new(PremiumModel::new(Box::new(classifier))),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
