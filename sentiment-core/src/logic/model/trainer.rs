//! Trainer - Multinomial Naive Bayes fitting
//!
//! Labeled text -> Model. No I/O: persisting the result is the artifact
//! store's job.

use chrono::Utc;
use thiserror::Error;

use crate::constants::{DEFAULT_SMOOTHING_ALPHA, MODEL_FORMAT_VERSION};
use crate::logic::dataset::TrainingExample;
use crate::logic::tokenizer::tokenize;

use super::types::{Label, Model, ModelError, Vocabulary};

#[derive(Debug, Error)]
pub enum TrainingDataError {
    #[error("training set is empty")]
    Empty,

    #[error("training set only contains {0} examples")]
    SingleClass(Label),

    #[error("example {index} has label {label}, expected 0 or 1")]
    InvalidLabel { index: usize, label: u8 },

    #[error("smoothing alpha must be finite and positive, got {0}")]
    InvalidAlpha(f64),

    #[error("no example produced a single token")]
    EmptyVocabulary,

    #[error("trained model is invalid: {0}")]
    Model(#[from] ModelError),
}

/// Naive Bayes trainer with additive smoothing
#[derive(Debug, Clone)]
pub struct Trainer {
    alpha: f64,
}

impl Default for Trainer {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn fit(&self, examples: &[TrainingExample]) -> Result<Model, TrainingDataError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(TrainingDataError::InvalidAlpha(self.alpha));
        }
        if examples.is_empty() {
            return Err(TrainingDataError::Empty);
        }

        let mut vocabulary = Vocabulary::new();
        let mut doc_counts = [0usize; 2];
        // [class][token_index] -> occurrences
        let mut token_counts: [Vec<u64>; 2] = [Vec::new(), Vec::new()];
        let mut class_totals = [0u64; 2];

        for (index, example) in examples.iter().enumerate() {
            let label = Label::from_class(example.label).ok_or(TrainingDataError::InvalidLabel {
                index,
                label: example.label,
            })?;
            let class = label.class_index();
            doc_counts[class] += 1;

            for token in tokenize(&example.text) {
                let idx = vocabulary.insert(&token);
                let counts = &mut token_counts[class];
                if counts.len() <= idx {
                    counts.resize(idx + 1, 0);
                }
                counts[idx] += 1;
                class_totals[class] += 1;
            }
        }
        for counts in token_counts.iter_mut() {
            counts.resize(vocabulary.len(), 0);
        }

        match doc_counts {
            [0, _] => return Err(TrainingDataError::SingleClass(Label::Positive)),
            [_, 0] => return Err(TrainingDataError::SingleClass(Label::Negative)),
            _ => {}
        }
        if vocabulary.is_empty() {
            return Err(TrainingDataError::EmptyVocabulary);
        }

        let total = examples.len() as f64;
        let class_priors = [doc_counts[0] as f64 / total, doc_counts[1] as f64 / total];

        let vocab_size = vocabulary.len() as f64;
        let log_likelihoods = |class: usize| -> Vec<f64> {
            let denominator = class_totals[class] as f64 + self.alpha * vocab_size;
            token_counts[class]
                .iter()
                .map(|&count| ((count as f64 + self.alpha) / denominator).ln())
                .collect()
        };
        let token_log_likelihoods = [log_likelihoods(0), log_likelihoods(1)];

        log::info!(
            "Trained model on {} examples ({} negative / {} positive), vocabulary size {}",
            examples.len(),
            doc_counts[0],
            doc_counts[1],
            vocabulary.len()
        );

        let model = Model::from_parts(
            MODEL_FORMAT_VERSION,
            vocabulary,
            class_priors,
            token_log_likelihoods,
            self.alpha,
            Utc::now(),
            examples.len(),
        )?;
        Ok(model)
    }
}

/// Fit with the default smoothing (alpha = 1)
pub fn fit(examples: &[TrainingExample]) -> Result<Model, TrainingDataError> {
    Trainer::default().fit(examples)
}

// ============================================================================
// TESTS
// ============================================================================
