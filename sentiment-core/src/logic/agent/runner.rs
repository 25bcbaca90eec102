//! Agent Loop
//!
//! Drains a queue of texts one at a time: classify, dispatch, pause.
//! A failed item is reported and skipped; it never stops the loop.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout};

use crate::constants;
use crate::logic::model::Label;

use super::actions::{Action, ActionExecutor, DispatchTable};
use super::client::{AgentError, PredictionBackend};

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Prediction endpoint
    pub api_url: String,
    /// Upper bound on one prediction call
    pub request_timeout: Duration,
    /// Delay between iterations
    pub pace: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
            pace: Duration::from_millis(constants::DEFAULT_PACE_MS),
        }
    }
}

impl AgentConfig {
    /// Read from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_url: constants::get_api_url(),
            request_timeout: constants::get_request_timeout(),
            pace: constants::get_pace(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    /// Queue empty
    Idle,
    /// Items remain
    Processing,
}

/// What happened to one queue item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub text: String,
    pub sentiment: Option<String>,
    pub action: Option<Action>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentReport {
    pub processed: usize,
    pub failed: usize,
    pub actions_triggered: usize,
    pub outcomes: Vec<ItemOutcome>,
}

pub struct Agent<B, E> {
    backend: B,
    executor: E,
    table: DispatchTable,
    request_timeout: Duration,
    pace: Duration,
    state: AgentState,
}

impl<B: PredictionBackend, E: ActionExecutor> Agent<B, E> {
    pub fn new(backend: B, executor: E, config: &AgentConfig) -> Self {
        Self {
            backend,
            executor,
            table: DispatchTable::default(),
            request_timeout: config.request_timeout,
            pace: config.pace,
            state: AgentState::Idle,
        }
    }

    pub fn with_dispatch_table(mut self, table: DispatchTable) -> Self {
        self.table = table;
        self
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Process every queued item in order, then go idle
    pub async fn run<I>(&mut self, queue: I) -> AgentReport
    where
        I: IntoIterator<Item = String>,
    {
        let mut queue: VecDeque<String> = queue.into_iter().collect();
        let mut report = AgentReport::default();

        log::info!("Agent is starting up... monitoring queue ({} items)", queue.len());

        while let Some(item) = queue.pop_front() {
            self.state = AgentState::Processing;

            let outcome = match self.process_item(&item).await {
                Ok((sentiment, action)) => {
                    report.processed += 1;
                    if action.is_some() {
                        report.actions_triggered += 1;
                    }
                    ItemOutcome {
                        text: item,
                        sentiment: Some(sentiment),
                        action,
                        error: None,
                    }
                }
                Err(e) => {
                    log::error!("Skipping {:?}: {}", item, e);
                    report.failed += 1;
                    ItemOutcome {
                        text: item,
                        sentiment: None,
                        action: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.outcomes.push(outcome);

            if !queue.is_empty() && !self.pace.is_zero() {
                sleep(self.pace).await;
            }
        }

        self.state = AgentState::Idle;
        log::info!(
            "Queue empty. Agent going to sleep. ({} processed, {} failed)",
            report.processed,
            report.failed
        );
        report
    }

    async fn process_item(&mut self, text: &str) -> Result<(String, Option<Action>), AgentError> {
        let sentiment = timeout(self.request_timeout, self.backend.classify(text))
            .await
            .map_err(|_| AgentError::Timeout(self.request_timeout))??;

        log::info!("Analyzing: '{}' -> Verdict: {}", text, sentiment);

        let action = match sentiment.parse::<Label>() {
            Ok(label) => self.table.action_for(label),
            Err(e) => {
                log::warn!("{}, no action taken", e);
                None
            }
        };

        if let Some(action) = action {
            self.executor.execute(action, text)?;
        }

        Ok((sentiment, action))
    }
}

// ============================================================================
// TESTS
// ============================================================================
