//! Sentiment Classifier - Core
//!
//! Trains a multinomial Naive Bayes model on labeled text, stores it as a
//! versioned artifact, serves Positive/Negative predictions, logs each
//! prediction and drives downstream actions from the predicted label.
//!
//! ```text
//! Trainer ──► Artifact ──► PredictionService ──┬──► PredictionLogger
//!                                              └──► Agent ──► Actions
//! ```

pub mod constants;
pub mod logic;

pub use logic::model::{Label, Model, PredictionService};
pub use logic::tokenizer::tokenize;
