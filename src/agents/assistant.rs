//! Assistant agent.
//!
//! Answers free-text questions about the platform and, when a record is
//! available, about the currently extracted SoF data. Plain-text output; no
//! JSON mode.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{Agent, AgentError};

/// Input for the Assistant agent.
#[derive(Debug, Clone)]
pub struct AssistantInput {
    /// The user's question
    pub query: String,

    /// Optional JSON of the current extraction record, for grounded answers
    pub context: Option<String>,
}

/// Output from the Assistant agent.
#[derive(Debug, Clone)]
pub struct AssistantOutput {
    pub response: String,
}

/// Assistant agent implementation.
pub struct AssistantAgent {
    backend: Arc<dyn AiBackend>,
}

impl AssistantAgent {
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(&self, query: &str, context: Option<&str>) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(ASSISTANT_SYSTEM_PROMPT)];
        if let Some(ctx) = context {
            messages.push(ChatMessage::system(format!(
                "The user currently has this extracted SoF data loaded:\n{}",
                ctx
            )));
        }
        messages.push(ChatMessage::user(query.to_string()));
        messages
    }
}

const ASSISTANT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant for the SoF Laytime Intelligence platform.

The platform lets users upload Statements of Fact (SoFs), extract port operation events, calculate laytime and demurrage, and visualize the results. Users upload a file, review the extracted event list, adjust the allowed laytime, demurrage rate, and currencies, and can download the full record as JSON.

Answer user questions about how to use the platform and, when extraction data is provided, about the data itself. Keep answers short and practical."#;

#[async_trait]
impl Agent for AssistantAgent {
    type Input = AssistantInput;
    type Output = AssistantOutput;

    fn name(&self) -> &'static str {
        "assistant"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        info!("Assistant query: {} chars", input.query.len());

        let messages = self.build_prompt(&input.query, input.context.as_deref());
        let request = ChatRequest::new(messages);

        let response = self.backend.chat(request).await?;

        Ok(AssistantOutput {
            response: response.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::MockBackend;

    #[tokio::test]
    async fn test_assistant_plain_text() {
        let backend = Arc::new(MockBackend::new(
            "Upload a .docx, .pdf or .txt file to get started.",
        ));
        let agent = AssistantAgent::new(backend);

        let output = agent
            .execute(AssistantInput {
                query: "How do I upload a SoF?".to_string(),
                context: None,
            })
            .await
            .unwrap();

        assert!(output.response.contains("Upload"));
    }

    #[test]
    fn test_prompt_includes_context_when_present() {
        let backend: Arc<dyn AiBackend> = Arc::new(MockBackend::new(""));
        let agent = AssistantAgent::new(backend);

        let with_ctx = agent.build_prompt("what happened?", Some(r#"{"vesselName":"MV X"}"#));
        assert_eq!(with_ctx.len(), 3);
        assert!(with_ctx[1].content.contains("MV X"));

        let without_ctx = agent.build_prompt("hello", None);
        assert_eq!(without_ctx.len(), 2);
    }
}
