//! Request/response models

pub mod prediction;

pub use prediction::*;
