//! Agent Module - Prediction-driven actions
//!
//! This module handles:
//! - Calling the prediction API (with a timeout)
//! - Mapping labels to actions through a dispatch table
//! - Draining the incoming queue at a configurable pace

pub mod actions;
pub mod client;
pub mod runner;

pub use actions::{Action, ActionError, ActionExecutor, ActionResult, DispatchTable, LoggingExecutor};
pub use client::{AgentError, HttpPredictionClient, PredictionBackend};
pub use runner::{Agent, AgentConfig, AgentReport, AgentState, ItemOutcome};

/// Demo queue used when the agent is started without input
pub const DEMO_QUEUE: &[&str] = &[
    "I am so happy with the service!",
    "The system is broken and I hate it.",
    "Data processing was fast and accurate.",
    "Why does this never work?",
];
