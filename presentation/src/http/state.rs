//! Shared handler state

use finquery_application::{
    AnswerQueryUseCase, ExtractTextUseCase, LookupIndicatorUseCase, ToolSchemaPort,
};
use serde_json::Value;
use std::sync::Arc;

/// Process-scoped use cases handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub answer: AnswerQueryUseCase,
    pub lookup: LookupIndicatorUseCase,
    pub ocr: ExtractTextUseCase,
    /// Tool declarations, rendered once at startup
    pub tools: Arc<Vec<Value>>,
}

impl AppState {
    pub fn new(
        answer: AnswerQueryUseCase,
        lookup: LookupIndicatorUseCase,
        ocr: ExtractTextUseCase,
        tool_schema: &dyn ToolSchemaPort,
    ) -> Self {
        let tools = tool_schema.all_tools_schema(answer.dispatcher().tool_spec());
        Self {
            answer,
            lookup,
            ocr,
            tools: Arc::new(tools),
        }
    }
}
