//! Agent Actions
//!
//! Label -> Action dispatch table and the executors that carry actions out.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::model::Label;

/// Keep at most this many results in an executor's history
const MAX_HISTORY: usize = 500;

// ============================================================================
// ACTION TYPES
// ============================================================================

/// Downstream action triggered by a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Escalate unhappy feedback
    OpenSupportTicket,
    /// Thank the customer
    SendAcknowledgment,
}

impl Action {
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::OpenSupportTicket => "open_support_ticket",
            Action::SendAcknowledgment => "send_acknowledgment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::OpenSupportTicket => "Opening Support Ticket!",
            Action::SendAcknowledgment => "Sending Thank You Email.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: Action,
    pub text: String,
    pub message: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Error)]
#[error("action {action} failed: {message}")]
pub struct ActionError {
    pub action: &'static str,
    pub message: String,
}

// ============================================================================
// DISPATCH TABLE
// ============================================================================

/// Label -> Action mapping. Labels without an entry trigger nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchTable {
    routes: HashMap<Label, Action>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::empty()
            .with_route(Label::Negative, Action::OpenSupportTicket)
            .with_route(Label::Positive, Action::SendAcknowledgment)
    }
}

impl DispatchTable {
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, label: Label, action: Action) -> Self {
        self.routes.insert(label, action);
        self
    }

    pub fn without_route(mut self, label: Label) -> Self {
        self.routes.remove(&label);
        self
    }

    pub fn action_for(&self, label: Label) -> Option<Action> {
        self.routes.get(&label).copied()
    }
}

// ============================================================================
// EXECUTORS
// ============================================================================

/// Carries out a dispatched action
pub trait ActionExecutor {
    fn execute(&mut self, action: Action, text: &str) -> Result<ActionResult, ActionError>;
}

/// Logs each action and keeps a bounded history
#[derive(Debug, Default)]
pub struct LoggingExecutor {
    history: Vec<ActionResult>,
}

impl LoggingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ActionResult] {
        &self.history
    }
}

impl ActionExecutor for LoggingExecutor {
    fn execute(&mut self, action: Action, text: &str) -> Result<ActionResult, ActionError> {
        match action {
            Action::OpenSupportTicket => log::warn!(">>> ALERT: {}", action.description()),
            Action::SendAcknowledgment => log::info!(">>> INFO: {}", action.description()),
        }

        let result = ActionResult {
            action,
            text: text.to_string(),
            message: action.description().to_string(),
            timestamp: Utc::now().timestamp(),
        };

        if self.history.len() >= MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(result.clone());
        Ok(result)
    }
}
