//! Model Module - Naive Bayes sentiment classifier
//!
//! Training, the versioned artifact format, and the inference service are
//! kept apart so the artifact can be produced and consumed independently.

pub mod types;
pub mod trainer;
pub mod artifact;
pub mod inference;

// Re-export common types
pub use types::{Label, Model, ModelError, UnknownLabel, Vocabulary};
pub use trainer::{fit, Trainer, TrainingDataError};
pub use artifact::{ArtifactError, SUPPORTED_VERSIONS};
pub use inference::{EngineStatus, InferenceError, Prediction, PredictionService};
