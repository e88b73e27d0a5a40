//! `generateContent` wire types and conversions.
//!
//! Only the subset of the REST API the pipeline uses: text and
//! function-call parts, function declarations, and the system instruction.

use super::error::{GeminiError, Result};
use finquery_domain::session::response::{ContentBlock, LlmResponse, StopReason};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(ROLE_USER.to_string()),
            parts: vec![Part::text(text)],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Opaque token from thinking models; must be echoed back in history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Function response part. The API requires `response` to be an object,
    /// so anything else is wrapped as `{"result": value}`.
    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        let response = if response.is_object() {
            response
        } else {
            serde_json::json!({ "result": response })
        };
        Self {
            function_response: Some(FunctionResponse {
                name: name.into(),
                response,
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            tools: None,
            generation_config: None,
        }
    }

    pub fn with_system_instruction(mut self, system: Option<&str>) -> Self {
        self.system_instruction = system.filter(|s| !s.is_empty()).map(Content::system);
        self
    }

    /// Declare functions; an empty list leaves the `tools` field out.
    pub fn with_function_declarations(mut self, declarations: &[serde_json::Value]) -> Self {
        self.tools = (!declarations.is_empty()).then(|| {
            vec![Tool {
                function_declarations: declarations.to_vec(),
            }]
        });
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.generation_config = temperature.map(|t| GenerationConfig {
            temperature: Some(t),
        });
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pull a readable message out of an error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({})", envelope.error.message, status),
            None => envelope.error.message,
        },
        Err(_) => body.chars().take(500).collect(),
    }
}

fn stop_reason(finish_reason: Option<&str>, has_call: bool) -> Option<StopReason> {
    if has_call {
        return Some(StopReason::FunctionCall);
    }
    finish_reason.map(|reason| match reason {
        "STOP" => StopReason::EndTurn,
        "MAX_TOKENS" => StopReason::MaxTokens,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => StopReason::Safety,
        other => StopReason::Other(other.to_string()),
    })
}

fn args_map(args: serde_json::Value) -> HashMap<String, serde_json::Value> {
    match args {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    }
}

impl GenerateContentResponse {
    /// Convert to an [`LlmResponse`] plus the model turn to append to history.
    ///
    /// A prompt blocked before generation yields an empty response with
    /// [`StopReason::Safety`]; a body with no candidates and no block reason
    /// is an unexpected response.
    pub fn into_llm_response(self) -> Result<(LlmResponse, Option<Content>)> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
                tracing::warn!(reason = %reason, "Prompt blocked by model");
                let blocked = LlmResponse {
                    content: Vec::new(),
                    stop_reason: Some(StopReason::Safety),
                    model: self.model_version,
                };
                return Ok((blocked, None));
            }
            return Err(GeminiError::UnexpectedResponse(
                "response contained no candidates".to_string(),
            ));
        };

        let turn = candidate.content.clone();
        let mut blocks = Vec::new();
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if let Some(text) = part.text {
                blocks.push(ContentBlock::Text(text));
            }
            if let Some(call) = part.function_call {
                blocks.push(ContentBlock::FunctionCall {
                    name: call.name,
                    args: args_map(call.args),
                });
            }
        }

        let has_call = blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::FunctionCall { .. }));
        let response = LlmResponse {
            content: blocks,
            stop_reason: stop_reason(candidate.finish_reason.as_deref(), has_call),
            model: self.model_version,
        };
        Ok((response, turn))
    }
}
