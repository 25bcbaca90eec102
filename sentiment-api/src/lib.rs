//! Sentiment Analysis API
//!
//! HTTP front for the sentiment classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  SENTIMENT API                       │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────────────┐               │
//! │  │  Router   │──►│ PredictionService │ (frozen model)│
//! │  │  (Axum)   │   └───────────────────┘               │
//! │  └─────┬─────┘                                       │
//! │        ▼                                             │
//! │  ┌──────────────────┐                                │
//! │  │ PredictionLogger │ (JSONL, append-only)           │
//! │  └──────────────────┘                                │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use sentiment_core::logic::model::PredictionService;
use sentiment_core::logic::telemetry::PredictionSink;

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub sink: Arc<dyn PredictionSink>,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/status", get(handlers::health::status))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allows_any_origin() {
        if config.is_production() {
            tracing::warn!("CORS allows any origin in production");
        }
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
