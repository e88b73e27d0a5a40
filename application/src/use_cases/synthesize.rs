//! Response synthesis.
//!
//! Produces the user-facing summary text. A tool outcome, success or error,
//! is always sent back to the model in the same session so failures come
//! out as a conversational explanation. When that round trip cannot be
//! made, a templated apology naming the tool is used instead.

use crate::ports::llm_gateway::{LlmSession, ToolResultMessage};
use finquery_domain::PromptTemplate;
use finquery_domain::tool::entities::ToolCall;
use finquery_domain::tool::value_objects::ToolOutcome;
use tracing::{debug, warn};

/// Turns a planning response or a tool outcome into summary text.
#[derive(Debug, Clone, Default)]
pub struct ResponseSynthesizer;

impl ResponseSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// The model answered without choosing a tool.
    pub fn direct(&self, model_text: &str) -> String {
        let text = model_text.trim();
        if text.is_empty() {
            warn!("Model returned neither text nor a function call");
            return PromptTemplate::empty_answer_apology().to_string();
        }
        text.to_string()
    }

    /// Feed the outcome back to the model and return its follow-up text.
    pub async fn after_tool(
        &self,
        session: &dyn LlmSession,
        call: &ToolCall,
        outcome: &ToolOutcome,
    ) -> String {
        let tool_name = call.tool_name.trim();
        let message = ToolResultMessage {
            tool_name: tool_name.to_string(),
            output: outcome.function_response(),
            is_error: !outcome.is_success(),
        };

        debug!(
            "Sending {} result back to model (is_error={})",
            tool_name, message.is_error
        );

        match session.send_tool_results(std::slice::from_ref(&message)).await {
            Ok(response) => {
                let text = response.text_content();
                if text.trim().is_empty() {
                    warn!("Model returned empty text after {} result", tool_name);
                    PromptTemplate::tool_failure_apology(tool_name)
                } else {
                    text.trim().to_string()
                }
            }
            Err(e) => {
                warn!("Synthesis call failed after {}: {}", tool_name, e);
                PromptTemplate::tool_failure_apology(tool_name)
            }
        }
    }
}
