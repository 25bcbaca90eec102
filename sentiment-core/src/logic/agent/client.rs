//! Prediction API Client
//!
//! How the agent reaches the prediction service: over HTTP, or in-process.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::model::{InferenceError, PredictionService};

use super::actions::ActionError;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("prediction request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Transport(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("bad response body: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error(transparent)]
    Service(#[from] InferenceError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

// ============================================================================
// BACKEND
// ============================================================================

/// Something that turns text into a sentiment label string
pub trait PredictionBackend {
    fn classify(&self, text: &str) -> impl Future<Output = Result<String, AgentError>> + Send;
}

impl PredictionBackend for PredictionService {
    fn classify(&self, text: &str) -> impl Future<Output = Result<String, AgentError>> + Send {
        let result = self
            .predict(text)
            .map(|label| label.as_str().to_string())
            .map_err(AgentError::from);
        async move { result }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub text: String,
    pub sentiment: String,
    pub model_version: String,
}

// ============================================================================
// HTTP CLIENT
// ============================================================================

/// Client for `POST /predict`
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpPredictionClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, AgentError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Client(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            timeout,
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn predict(&self, text: &str) -> Result<PredictResponse, AgentError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&PredictRequest { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout(self.timeout)
                } else {
                    AgentError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AgentError::Status(response.status().as_u16()));
        }

        response
            .json::<PredictResponse>()
            .await
            .map_err(|e| AgentError::Decode(e.to_string()))
    }
}

impl PredictionBackend for HttpPredictionClient {
    fn classify(&self, text: &str) -> impl Future<Output = Result<String, AgentError>> + Send {
        let text = text.to_string();
        async move {
            let response = self.predict(&text).await?;
            log::debug!("Model v{} answered {}", response.model_version, response.sentiment);
            Ok(response.sentiment)
        }
    }
}
