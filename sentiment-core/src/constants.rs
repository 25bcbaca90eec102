//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.

use std::time::Duration;

/// Artifact/model format version written by the trainer
pub const MODEL_FORMAT_VERSION: &str = "1.0";

/// Additive smoothing used when none is given
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 1.0;

/// Default artifact location
pub const DEFAULT_MODEL_PATH: &str = "sentiment_model.json";

/// Default prediction log directory
pub const DEFAULT_LOG_DIR: &str = "prediction_logs";

/// Prediction log rotation threshold (50 MB)
pub const DEFAULT_MAX_LOG_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Default prediction endpoint used by the agent
pub const DEFAULT_API_URL: &str = "http://localhost:8000/predict";

/// Default per-request timeout for the agent (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default delay between agent iterations (milliseconds)
pub const DEFAULT_PACE_MS: u64 = 1000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Artifact path from `MODEL_PATH` or default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Prediction log directory from `PREDICTION_LOG_DIR` or default
pub fn get_log_dir() -> String {
    std::env::var("PREDICTION_LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string())
}

/// Prediction endpoint from `PREDICT_API_URL` or default
pub fn get_api_url() -> String {
    std::env::var("PREDICT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Agent request timeout from `AGENT_REQUEST_TIMEOUT_SECS` or default
pub fn get_request_timeout() -> Duration {
    let secs = std::env::var("AGENT_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Agent pacing from `AGENT_PACE_MS` or default
pub fn get_pace() -> Duration {
    let ms = std::env::var("AGENT_PACE_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PACE_MS);
    Duration::from_millis(ms)
}
