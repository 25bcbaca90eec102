//! Prediction Service - Naive Bayes inference
//!
//! Holds the one Model loaded at startup and answers `predict` calls from
//! any number of threads. The model is frozen by `initialize`; readers
//! never take a lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::tokenizer::tokenize;

use super::types::{Label, Model};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Engine status for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_version: Option<String>,
    pub vocabulary_size: usize,
    pub inference_count: u64,
    pub avg_latency_us: f64,
}

/// Prediction output with the evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    pub negative_score: f64,
    pub positive_score: f64,
    /// Tokens found in the vocabulary
    pub known_tokens: usize,
    /// Tokens ignored as out-of-vocabulary
    pub unknown_tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("prediction service used before initialize")]
    NotInitialized,

    #[error("prediction service is already initialized")]
    AlreadyInitialized,
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Default)]
pub struct PredictionService {
    model: OnceCell<Arc<Model>>,
    inference_count: AtomicU64,
    latency_sum_us: AtomicU64,
}

impl PredictionService {
    /// Uninitialized service; call `initialize` before serving
    pub fn new() -> Self {
        Self::default()
    }

    /// Service that is ready to serve `model`
    pub fn with_model(model: Model) -> Self {
        let service = Self::new();
        // A fresh cell is always empty
        let _ = service.model.set(Arc::new(model));
        service
    }

    /// One-time setup. The model is immutable from here on.
    pub fn initialize(&self, model: Model) -> Result<(), InferenceError> {
        let version = model.version().to_string();
        let vocab = model.vocabulary().len();
        self.model
            .set(Arc::new(model))
            .map_err(|_| InferenceError::AlreadyInitialized)?;

        log::info!("Prediction service initialized: model v{} ({} tokens)", version, vocab);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.model.get().is_some()
    }

    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.get()
    }

    pub fn model_version(&self) -> Option<&str> {
        self.model.get().map(|m| m.version())
    }

    pub fn predict(&self, text: &str) -> Result<Label, InferenceError> {
        self.predict_detailed(text).map(|p| p.label)
    }

    /// Score both classes. Out-of-vocabulary tokens add no evidence;
    /// an exact tie resolves to Negative.
    pub fn predict_detailed(&self, text: &str) -> Result<Prediction, InferenceError> {
        let model = self.model.get().ok_or(InferenceError::NotInitialized)?;
        let start = Instant::now();

        let mut scores = Label::ALL.map(|label| model.prior(label).ln());
        let mut known_tokens = 0;
        let mut unknown_tokens = 0;

        for token in tokenize(text) {
            match model.vocabulary().get(&token) {
                Some(idx) => {
                    known_tokens += 1;
                    for label in Label::ALL {
                        scores[label.class_index()] += model.token_log_likelihoods(label)[idx];
                    }
                }
                None => unknown_tokens += 1,
            }
        }

        let [negative_score, positive_score] = scores;
        let label = if positive_score > negative_score {
            Label::Positive
        } else {
            Label::Negative
        };

        self.latency_sum_us
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(Prediction {
            label,
            negative_score,
            positive_score,
            known_tokens,
            unknown_tokens,
        })
    }

    pub fn status(&self) -> EngineStatus {
        let model = self.model.get();
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { sum as f64 / count as f64 } else { 0.0 };

        EngineStatus {
            model_loaded: model.is_some(),
            model_version: model.map(|m| m.version().to_string()),
            vocabulary_size: model.map_or(0, |m| m.vocabulary().len()),
            inference_count: count,
            avg_latency_us: avg,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::default_corpus;
    use crate::logic::model::trainer::fit;
    use crate::logic::model::types::Vocabulary;
    use chrono::Utc;

    fn service() -> PredictionService {
        PredictionService::with_model(fit(&default_corpus()).unwrap())
    }

    #[test]
    fn test_expected_labels() {
        let service = service();
        assert_eq!(service.predict("I love this product").unwrap(), Label::Positive);
        assert_eq!(service.predict("This is garbage").unwrap(), Label::Negative);
        assert_eq!(service.predict("Best Product Ever!").unwrap(), Label::Positive);
        assert_eq!(service.predict("Worst Product Ever.").unwrap(), Label::Negative);
    }

    #[test]
    fn test_deterministic() {
        let service = service();
        let text = "Data processing was fast and accurate.";
        let first = service.predict_detailed(text).unwrap();
        for _ in 0..20 {
            assert_eq!(service.predict_detailed(text).unwrap(), first);
        }
    }

    #[test]
    fn test_out_of_vocabulary_uses_priors() {
        let service = service();
        let prediction = service.predict_detailed("zyzzyva quux").unwrap();
        assert_eq!(prediction.known_tokens, 0);
        assert_eq!(prediction.unknown_tokens, 2);
        assert_eq!(prediction.negative_score, 0.5f64.ln());
        // Balanced priors tie, tie goes to Negative
        assert_eq!(prediction.label, Label::Negative);

        let skewed = PredictionService::with_model(
            fit(&[
                crate::logic::dataset::TrainingExample::new("good", 1),
                crate::logic::dataset::TrainingExample::new("great", 1),
                crate::logic::dataset::TrainingExample::new("bad", 0),
            ])
            .unwrap(),
        );
        assert_eq!(skewed.predict("zyzzyva").unwrap(), Label::Positive);
    }

    #[test]
    fn test_empty_text_is_classified() {
        let prediction = service().predict_detailed("").unwrap();
        assert_eq!(prediction.known_tokens + prediction.unknown_tokens, 0);
        assert_eq!(prediction.label, Label::Negative);
    }

    #[test]
    fn test_exact_tie_prefers_negative() {
        let vocabulary = Vocabulary::try_from(vec!["meh".to_string()]).unwrap();
        let model = Model::from_parts(
            "1.0",
            vocabulary,
            [0.5, 0.5],
            [vec![-1.25], vec![-1.25]],
            1.0,
            Utc::now(),
            2,
        )
        .unwrap();
        let service = PredictionService::with_model(model);

        let prediction = service.predict_detailed("meh meh meh").unwrap();
        assert_eq!(prediction.negative_score, prediction.positive_score);
        assert_eq!(prediction.label, Label::Negative);
    }

    #[test]
    fn test_not_initialized() {
        let service = PredictionService::new();
        assert!(!service.is_initialized());
        assert_eq!(service.predict("hello"), Err(InferenceError::NotInitialized));
        assert!(!service.status().model_loaded);
    }

    #[test]
    fn test_initialize_once() {
        let service = PredictionService::new();
        service.initialize(fit(&default_corpus()).unwrap()).unwrap();
        assert_eq!(service.model_version(), Some("1.0"));
        assert_eq!(
            service.initialize(fit(&default_corpus()).unwrap()),
            Err(InferenceError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_concurrent_matches_sequential() {
        let service = Arc::new(service());
        let texts: Vec<String> = [
            "I love this product",
            "This is garbage",
            "I am so happy with the service!",
            "The system is broken and I hate it.",
            "Why does this never work?",
            "",
        ]
        .iter()
        .cycle()
        .take(64)
        .map(|s| s.to_string())
        .collect();

        let sequential: Vec<Label> = texts.iter().map(|t| service.predict(t).unwrap()).collect();

        let concurrent: Vec<Label> = std::thread::scope(|scope| {
            let handles: Vec<_> = texts
                .iter()
                .map(|text| {
                    let service = Arc::clone(&service);
                    scope.spawn(move || service.predict(text).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(concurrent, sequential);
    }

    #[test]
    fn test_status_counts_inferences() {
        let service = service();
        for _ in 0..3 {
            service.predict("fantastic").unwrap();
        }
        let status = service.status();
        assert!(status.model_loaded);
        assert_eq!(status.inference_count, 3);
        assert_eq!(status.model_version.as_deref(), Some("1.0"));
        assert_eq!(status.vocabulary_size, 29);
    }
}
