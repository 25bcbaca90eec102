//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use sentiment_core::logic::model::EngineStatus;

use crate::models::RootResponse;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

/// `GET /` acknowledgment, no side effects
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Sentiment Analysis API is running!".to_string(),
    })
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Model and inference statistics
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.service.status())
}
