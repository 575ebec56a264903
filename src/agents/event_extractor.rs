//! Event Extractor agent.
//!
//! The extraction gateway: sends SoF text to the backend with a structured
//! output contract and returns the vessel name, the port operation events,
//! and the merged laytime judgment. The response is schema-validated at this
//! boundary; a response without a vessel name or without events is a hard
//! failure for the request, never a partial result.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{extract_json, Agent, AgentError};
use crate::models::{LaytimeBreakdown, PortEvent};

/// Input for the Event Extractor agent.
#[derive(Debug, Clone)]
pub struct EventExtractorInput {
    /// Plain text of the Statement of Fact
    pub sof_content: String,
}

/// Output from the Event Extractor agent.
#[derive(Debug, Clone)]
pub struct EventExtractorOutput {
    pub vessel_name: String,
    pub events: Vec<PortEvent>,
    /// The gateway's laytime judgment; absent when the model could not
    /// produce one reliably.
    pub laytime: Option<LaytimeBreakdown>,
}

/// Raw gateway response shape.
#[derive(Debug, Deserialize)]
struct ExtractorResponse {
    #[serde(rename = "vesselName", default)]
    vessel_name: Option<String>,
    #[serde(default)]
    events: Vec<PortEvent>,
    #[serde(rename = "laytimeCalculation", default)]
    laytime_calculation: Option<LaytimeBreakdown>,
}

/// Event Extractor agent implementation.
pub struct EventExtractorAgent {
    backend: Arc<dyn AiBackend>,
}

impl EventExtractorAgent {
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(&self, sof_content: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(EVENT_EXTRACTOR_SYSTEM_PROMPT),
            ChatMessage::user(format!("SoF Content:\n```\n{}\n```", sof_content)),
        ]
    }

    fn parse_response(&self, response: &str) -> Result<EventExtractorOutput, AgentError> {
        let json_str = extract_json(response);
        let parsed: ExtractorResponse = serde_json::from_str(json_str)
            .map_err(|e| AgentError::ResponseParseError(format!("Invalid JSON: {}", e)))?;

        let vessel_name = parsed
            .vessel_name
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AgentError::MissingFields("vesselName".to_string()))?;

        if parsed.events.is_empty() {
            return Err(AgentError::MissingFields("events".to_string()));
        }

        Ok(EventExtractorOutput {
            vessel_name,
            events: parsed.events,
            laytime: parsed.laytime_calculation,
        })
    }
}

const EVENT_EXTRACTOR_SYSTEM_PROMPT: &str = r#"You are an AI assistant specializing in maritime logistics and data extraction from Statements of Fact (SoFs).

Your task is to meticulously analyze the content of the SoF provided and extract all port operation events, then calculate the laytime. You must structure the output accurately into a JSON format.

Pay close attention to details. Identify each distinct event, its category (like 'Arrival', 'Cargo Operations', 'Bunkering', 'Delays', 'Departure'), its precise start and end times (in YYYY-MM-DD HH:MM format), calculate the duration, determine its status, and include any relevant remarks. Ensure every event mentioned in the document is captured.

For the laytime calculation, determine which events count towards laytime:
- Standard operations like 'Berthing', 'Loading', 'Discharging' are counted.
- Delays caused by the vessel or charterer are counted.
- Delays caused by the port, weather, or equipment failure are not counted (interruptions).
- Weekends and holidays are not counted unless the event list says otherwise.
Assume a standard allowed laytime of "3 days" unless the document specifies one.

Return JSON in this exact format:
{
  "vesselName": "MV Ocean Star",
  "events": [
    {
      "event": "Pilot Onboard",
      "category": "Arrival",
      "startTime": "2024-03-01 06:00",
      "endTime": "2024-03-01 06:30",
      "duration": "30 minutes",
      "status": "Completed",
      "remark": "Pilot boarded at anchorage"
    }
  ],
  "laytimeCalculation": {
    "totalLaytime": "2 days, 4 hours, 30 minutes",
    "allowedLaytime": "3 days",
    "timeSaved": "19 hours, 30 minutes",
    "demurrage": "0h 0m",
    "laytimeEvents": [
      {
        "event": "Cargo Discharging",
        "duration": "1 day, 6 hours",
        "isCounted": true,
        "reason": "Standard cargo operation"
      }
    ]
  }
}

IMPORTANT:
- vesselName and events are mandatory
- Durations are human-readable strings using the words "days", "hours", "minutes"
- Do NOT invent events that are not in the document
- For each laytime event give a brief reason why it is or is not counted"#;

#[async_trait]
impl Agent for EventExtractorAgent {
    type Input = EventExtractorInput;
    type Output = EventExtractorOutput;

    fn name(&self) -> &'static str {
        "event_extractor"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        info!(
            "Running Event Extractor on {} chars of SoF text",
            input.sof_content.len()
        );

        let messages = self.build_prompt(&input.sof_content);
        let request = ChatRequest::new(messages).with_json_mode().with_temperature(0.1);

        let response = self.backend.chat(request).await?;
        debug!("AI response: {}", response.content);

        let output = self.parse_response(&response.content)?;

        info!(
            "Extracted {} events for vessel {}",
            output.events.len(),
            output.vessel_name
        );

        Ok(output)
    }
}
