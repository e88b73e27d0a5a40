//! Gemini session management.
//!
//! Provides [`GeminiSession`] which implements [`LlmSession`] for one query's
//! conversation. The API is stateless, so the session keeps the turn history
//! and resends it, together with the declared functions, on every call.

use super::error::{GeminiError, Result};
use super::protocol::{
    Content, GenerateContentRequest, GenerateContentResponse, Part, ROLE_USER, error_message,
};
use async_trait::async_trait;
use finquery_application::ports::llm_gateway::{GatewayError, LlmSession, ToolResultMessage};
use finquery_domain::session::response::LlmResponse;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Conversation {
    history: Vec<Content>,
    declarations: Vec<serde_json::Value>,
}

/// An active conversation with one Gemini model.
pub struct GeminiSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: String,
    temperature: Option<f32>,
    conversation: Mutex<Conversation>,
}

impl GeminiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
        model: String,
        system_prompt: String,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            system_prompt,
            temperature: None,
            conversation: Mutex::new(Conversation::default()),
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Append `turn` and call the model. History only grows when the call succeeds.
    async fn exchange(
        &self,
        turn: Content,
        declarations: Option<&[serde_json::Value]>,
    ) -> Result<LlmResponse> {
        let mut conversation = self.conversation.lock().await;
        if let Some(declarations) = declarations {
            conversation.declarations = declarations.to_vec();
        }

        let mut contents = conversation.history.clone();
        contents.push(turn.clone());

        let request = GenerateContentRequest::new(contents)
            .with_system_instruction(Some(&self.system_prompt))
            .with_function_declarations(&conversation.declarations)
            .with_temperature(self.temperature);

        debug!(
            model = %self.model,
            turns = request.contents.len(),
            functions = conversation.declarations.len(),
            "Calling generateContent"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let (mut llm_response, model_turn) = parsed.into_llm_response()?;
        if llm_response.model.is_none() {
            llm_response.model = Some(self.model.clone());
        }

        conversation.history.push(turn);
        if let Some(model_turn) = model_turn {
            conversation.history.push(model_turn);
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> std::result::Result<LlmResponse, GatewayError> {
        Ok(self
            .exchange(Content::user_text(content), Some(tools))
            .await?)
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> std::result::Result<LlmResponse, GatewayError> {
        if results.is_empty() {
            return Err(GatewayError::Other("No function results to send".to_string()));
        }

        let turn = Content {
            role: Some(ROLE_USER.to_string()),
            parts: results
                .iter()
                .map(|r| Part::function_response(&r.tool_name, r.output.clone()))
                .collect(),
        };
        Ok(self.exchange(turn, None).await?)
    }
}
