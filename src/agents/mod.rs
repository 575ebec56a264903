//! AI-powered extraction agents.
//!
//! Agents wrap a prompt template and a typed response contract around a
//! generative backend call. All agents implement the `Agent` trait.

use async_trait::async_trait;
use thiserror::Error;

pub mod assistant;
pub mod backend;
pub mod event_extractor;
pub mod event_summarizer;

/// Errors that can occur during agent execution.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI response unparseable: {0}")]
    ResponseParseError(String),

    #[error("AI response missing required fields: {0}")]
    MissingFields(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),
}

/// Core trait for all AI agents.
#[async_trait]
pub trait Agent {
    type Input;
    type Output;

    /// Agent identifier for logging.
    fn name(&self) -> &'static str;

    /// Execute the agent's task.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError>;
}

/// Extract the JSON payload from a model response.
///
/// Models in JSON mode still occasionally wrap output in code fences or
/// surround it with prose; take everything between the first `{` and the
/// last `}`.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
