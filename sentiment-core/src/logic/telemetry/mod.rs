//! Telemetry Module
//!
//! Durable record of every served prediction.
//!
//! ## Structure
//! - `record.rs` - PredictionRecord (immutable, timestamped)
//! - `recorder.rs` - Append-only JSONL writer (thread-safe) + read helpers
//!
//! ## Usage
//! ```ignore
//! use sentiment_core::logic::telemetry::{PredictionLogger, PredictionRecord, PredictionSink};
//!
//! let logger = PredictionLogger::new("prediction_logs")?;
//! logger.record(&PredictionRecord::new(text, label, "1.0"))?;
//! ```

pub mod record;
pub mod recorder;

pub use record::PredictionRecord;
pub use recorder::{
    list_log_files,
    read_records,
    LogError,
    PredictionLogger,
    PredictionSink,
};
