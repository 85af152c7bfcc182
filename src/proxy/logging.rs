//! Request logging utilities for provider dispatch
//!
//! Provides structured logging with correlation IDs. Log entries carry the
//! provider, model, turn count and outcome of a dispatch. They never carry the
//! credential or any conversation text.

use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::gateway::Outcome;

/// Context for tracking a single dispatch
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Provider handling this request
    pub provider: String,
    /// Model being used (if known yet)
    pub model: Option<String>,
    /// Number of turns in the conversation
    pub turns: usize,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(provider: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            provider: provider.to_string(),
            model: None,
            turns: 0,
        }
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the number of conversation turns
    pub fn with_turns(mut self, turns: usize) -> Self {
        self.turns = turns;
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log the outcome of a dispatch
    ///
    /// This is the one diagnostic entry emitted per call. `detail` must
    /// already be free of secrets.
    pub fn log_outcome(&self, outcome: Outcome, detail: Option<&str>) {
        match outcome {
            Outcome::Ok => info!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                model = ?self.model,
                turns = self.turns,
                outcome = %outcome,
                elapsed_ms = %self.elapsed_ms(),
                "Dispatch completed"
            ),
            Outcome::ValidationError => warn!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                model = ?self.model,
                turns = self.turns,
                outcome = %outcome,
                detail = ?detail,
                elapsed_ms = %self.elapsed_ms(),
                "Dispatch rejected"
            ),
            Outcome::ProviderError | Outcome::TransportError | Outcome::Misconfigured => error!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                model = ?self.model,
                turns = self.turns,
                outcome = %outcome,
                detail = ?detail,
                elapsed_ms = %self.elapsed_ms(),
                "Dispatch failed"
            ),
        }
    }
}
