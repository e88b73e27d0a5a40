//! Gemini LLM Gateway implementation

use super::error::GeminiError;
use super::session::GeminiSession;
use crate::config::FileModelConfig;
use async_trait::async_trait;
use finquery_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use tracing::info;

/// LLM Gateway for the Gemini `generateContent` REST API
pub struct GeminiLlmGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: Option<f32>,
}

impl GeminiLlmGateway {
    /// Build a gateway from the `[model]` config section.
    ///
    /// A missing API key is not an error here; session creation fails
    /// instead, so the server still starts without credentials.
    pub fn from_config(client: reqwest::Client, config: &FileModelConfig) -> Self {
        let api_key = config.resolve_api_key();
        info!(
            model = %config.name,
            has_key = api_key.is_some(),
            "GeminiLlmGateway initialized"
        );
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.name.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
        }
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn create_session(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let Some(api_key) = self.api_key.clone() else {
            return Err(GeminiError::MissingApiKey(self.api_key_env.clone()).into());
        };

        let session = GeminiSession::new(
            self.client.clone(),
            self.endpoint(),
            api_key,
            self.model.clone(),
            system_prompt.to_string(),
        )
        .with_temperature(self.temperature);

        Ok(Box::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> FileModelConfig {
        FileModelConfig {
            api_key: api_key.map(str::to_string),
            api_key_env: "FINQUERY_TEST_UNSET_GEMINI_KEY".to_string(),
            base_url: "https://example.test/v1beta/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint() {
        let gateway = GeminiLlmGateway::from_config(reqwest::Client::new(), &config(Some("k")));
        assert_eq!(
            gateway.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(gateway.model_name(), "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_missing_key_fails_session_creation() {
        let gateway = GeminiLlmGateway::from_config(reqwest::Client::new(), &config(None));
        let err = gateway.create_session("system").await.err().unwrap();
        assert!(matches!(err, GatewayError::Unauthorized(msg) if msg.contains("FINQUERY_TEST_UNSET_GEMINI_KEY")));
    }

    #[tokio::test]
    async fn test_session_created_with_key() {
        let gateway = GeminiLlmGateway::from_config(reqwest::Client::new(), &config(Some("k")));
        assert!(gateway.create_session("system").await.is_ok());
    }
}
