//! Dataset Module - Labeled Training Data
//!
//! Training examples, the built-in demo corpus, and a JSONL loader
//! for operator-supplied corpora.

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::{load_examples, DatasetError};

/// One hand-labeled training example (0 = Negative, 1 = Positive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: u8,
}

impl TrainingExample {
    pub fn new(text: &str, label: u8) -> Self {
        Self {
            text: text.to_string(),
            label,
        }
    }
}

/// Built-in demo corpus
const DEFAULT_CORPUS: &[(&str, u8)] = &[
    ("I love this product", 1),
    ("This is the worst experience ever", 0),
    ("Absolute garbage", 0),
    ("Fantastic and helpful", 1),
    ("This product exceeded my expectations", 1),
    ("I would not reccommend this to anyone", 0),
    ("Worst Product Ever.", 0),
    ("Best Product Ever!", 1),
    ("I am pleased with my purchase!!!", 1),
    ("This product was defective.", 0),
];

/// The small demo corpus the service ships with
pub fn default_corpus() -> Vec<TrainingExample> {
    DEFAULT_CORPUS
        .iter()
        .map(|(text, label)| TrainingExample::new(text, *label))
        .collect()
}
