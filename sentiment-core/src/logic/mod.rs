//! Logic Module - Classifier & Consumers
//!
//! ## Architecture
//! - `tokenizer` - Text normalization
//! - `dataset/` - Labeled training data
//! - `model/` - Training, artifact format, inference
//! - `telemetry/` - Prediction log
//! - `agent/` - Queue consumer that acts on predictions

pub mod tokenizer;
pub mod dataset;
pub mod model;
pub mod telemetry;
pub mod agent;
