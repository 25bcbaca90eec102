//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use sentiment_core::logic::telemetry::PredictionRecord;

use crate::models::{PredictRequest, PredictResponse};
use crate::{AppResult, AppState};

/// Classify one text and record the result.
///
/// A logging failure is reported through tracing only; the caller still
/// gets the classification.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload?;

    let label = state.service.predict(&req.text)?;
    let model_version = state.service.model_version().unwrap_or_default().to_string();

    let record = PredictionRecord::new(&req.text, label, &model_version);
    if let Err(e) = state.sink.record(&record) {
        tracing::error!(record_id = %record.id, "Failed to record prediction: {}", e);
    }

    tracing::debug!("Predicted {} for {} chars", label, req.text.len());

    Ok(Json(PredictResponse {
        text: req.text,
        sentiment: label,
        model_version,
    }))
}
