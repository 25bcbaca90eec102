//! Prediction wire types

use serde::{Deserialize, Serialize};

use sentiment_core::Label;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub text: String,
    /// "Positive" or "Negative"
    pub sentiment: Label,
    pub model_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}
