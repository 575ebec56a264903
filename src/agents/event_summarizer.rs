//! Event Summarizer agent.
//!
//! Produces a short, bulleted analyst summary of an extracted event list.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{extract_json, Agent, AgentError};
use crate::models::PortEvent;

/// Input for the Event Summarizer agent.
#[derive(Debug, Clone)]
pub struct EventSummarizerInput {
    pub events: Vec<PortEvent>,
}

/// Output from the Event Summarizer agent.
#[derive(Debug, Clone)]
pub struct EventSummarizerOutput {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
struct SummarizerResponse {
    summary: String,
}

/// Event Summarizer agent implementation.
pub struct EventSummarizerAgent {
    backend: Arc<dyn AiBackend>,
}

impl EventSummarizerAgent {
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(&self, events: &[PortEvent]) -> Vec<ChatMessage> {
        let mut listing = String::new();
        for e in events {
            listing.push_str(&format!(
                "- Event: {} ({})\n  - Start: {}\n  - End: {}\n  - Duration: {}\n  - Status: {}\n",
                e.title, e.category, e.start_time, e.end_time, e.duration, e.status
            ));
            if let Some(remark) = &e.remark {
                listing.push_str(&format!("  - Remark: {}\n", remark));
            }
        }

        vec![
            ChatMessage::system(EVENT_SUMMARIZER_SYSTEM_PROMPT),
            ChatMessage::user(format!("Events:\n{}", listing)),
        ]
    }
}

const EVENT_SUMMARIZER_SYSTEM_PROMPT: &str = r#"You are a maritime logistics analyst. Based on a structured list of port operation events, provide a concise, high-level summary of key insights.

Focus on:
- Total time spent in port.
- Duration of cargo operations.
- Any significant delays or interruptions and their causes.
- Comparison of actual time versus typical or expected times.

Present your summary as a bulleted list.

Return JSON in this exact format:
{"summary": "- First insight\n- Second insight"}"#;

#[async_trait]
impl Agent for EventSummarizerAgent {
    type Input = EventSummarizerInput;
    type Output = EventSummarizerOutput;

    fn name(&self) -> &'static str {
        "event_summarizer"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        info!("Summarizing {} port events", input.events.len());

        let messages = self.build_prompt(&input.events);
        let request = ChatRequest::new(messages).with_json_mode();

        let response = self.backend.chat(request).await?;
        debug!("AI response: {}", response.content);

        let parsed: SummarizerResponse = serde_json::from_str(extract_json(&response.content))
            .map_err(|e| AgentError::ResponseParseError(format!("Invalid JSON: {}", e)))?;

        Ok(EventSummarizerOutput {
            summary: parsed.summary,
        })
    }
}
