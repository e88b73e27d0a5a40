//! Model replies.
//!
//! A Gemini candidate is a list of parts mixing text and function calls.
//! Planning looks at the first function call: if there is one, a tool was
//! chosen; otherwise the concatenated text is the direct answer.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One part of a model reply.
///
/// ```
/// use finquery_domain::session::response::ContentBlock;
///
/// let call = ContentBlock::FunctionCall {
///     name: "get_stock_price".to_string(),
///     args: [("ticker".to_string(), serde_json::json!("AAPL"))]
///         .into_iter().collect(),
/// };
/// assert_eq!(call.to_tool_call().unwrap().get_string("ticker"), Some("AAPL"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(String),

    /// The name is whatever the model emitted. It may be empty or undeclared.
    FunctionCall {
        name: String,
        args: HashMap<String, Value>,
    },
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            ContentBlock::FunctionCall { .. } => None,
        }
    }

    pub fn to_tool_call(&self) -> Option<ToolCall> {
        match self {
            ContentBlock::FunctionCall { name, args } => {
                Some(ToolCall::new(name.as_str()).with_arguments(args.clone()))
            }
            ContentBlock::Text(_) => None,
        }
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    FunctionCall,
    /// Output may be truncated.
    MaxTokens,
    /// Blocked by the provider's safety filter
    Safety,
    Other(String),
}

/// A parsed model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    /// Model version, when the API reports one
    pub model: Option<String>,
}

impl LlmResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    pub fn from_tool_call(call: ToolCall) -> Self {
        Self {
            content: vec![ContentBlock::FunctionCall {
                name: call.tool_name,
                args: call.arguments,
            }],
            stop_reason: Some(StopReason::FunctionCall),
            model: None,
        }
    }

    /// All text parts joined without separators.
    pub fn text_content(&self) -> String {
        self.content.iter().filter_map(ContentBlock::as_text).collect()
    }

    /// The first function call. Only one tool runs per query, so any later
    /// calls are ignored.
    pub fn first_tool_call(&self) -> Option<ToolCall> {
        self.content.iter().find_map(ContentBlock::to_tool_call)
    }

    pub fn has_function_call(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::FunctionCall { .. }))
    }
}
