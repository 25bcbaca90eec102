//! Prediction Record
//!
//! Immutable, timestamped record of one served prediction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::model::Label;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input_text: String,
    pub predicted_label: Label,
    pub model_version: String,
}

impl PredictionRecord {
    pub fn new(input_text: &str, predicted_label: Label, model_version: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input_text: input_text.to_string(),
            predicted_label,
            model_version: model_version.to_string(),
        }
    }

    /// Single-line JSON form
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
