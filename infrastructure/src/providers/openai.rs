//! OpenAI client for image generation and text-to-speech
//!
//! Both capabilities hand back `data:` URLs so the response can carry the
//! artifact inline without a file store.

use super::{require_key, send_json, status_error};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use finquery_application::ports::data_providers::{ImageProvider, ProviderError, SpeechProvider};
use finquery_domain::util::truncate_chars;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const PROVIDER: &str = "OpenAI";

/// Input limit of `/audio/speech`, in characters.
pub const MAX_SPEECH_CHARS: usize = 4096;

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// Client for `/images/generations` and `/audio/speech`
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    image_model: String,
    image_size: String,
    speech_model: String,
    voice: String,
}

impl OpenAiClient {
    pub fn new(client: reqwest::Client, config: &FileOpenAiConfig, voice: impl Into<String>) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
            image_model: config.image_model.clone(),
            image_size: config.image_size.clone(),
            speech_model: config.speech_model.clone(),
            voice: voice.into(),
        }
    }
}

/// Extract the first `b64_json` image and wrap it as a PNG `data:` URL.
pub fn parse_image_response(body: &Value) -> Result<String, ProviderError> {
    let encoded = body
        .get("data")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| item.get("b64_json"))
        .and_then(Value::as_str)
        .filter(|b64| !b64.is_empty())
        .ok_or_else(|| ProviderError::empty(PROVIDER, "no image in response"))?;
    Ok(format!("data:image/png;base64,{}", encoded))
}

/// Encode MP3 bytes as a `data:` URL.
pub fn audio_data_url(bytes: &[u8]) -> String {
    format!("data:audio/mpeg;base64,{}", STANDARD.encode(bytes))
}

/// Cut text to the speech input limit on a character boundary.
pub fn speech_input(text: &str) -> &str {
    truncate_chars(text, MAX_SPEECH_CHARS)
}

#[async_trait]
impl ImageProvider for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let key = require_key(PROVIDER, &self.api_key)?;
        debug!(model = %self.image_model, "Requesting image");

        let request = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(key)
            .json(&ImageRequest {
                model: &self.image_model,
                prompt,
                n: 1,
                size: &self.image_size,
                response_format: "b64_json",
            });
        parse_image_response(&send_json(PROVIDER, request).await?)
    }
}

#[async_trait]
impl SpeechProvider for OpenAiClient {
    async fn synthesize(&self, text: &str) -> Result<String, ProviderError> {
        let key = require_key(PROVIDER, &self.api_key)?;
        let input = speech_input(text);
        if input.trim().is_empty() {
            return Err(ProviderError::invalid(PROVIDER, "nothing to speak"));
        }
        debug!(model = %self.speech_model, voice = %self.voice, chars = input.chars().count(), "Requesting speech");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(key)
            .json(&SpeechRequest {
                model: &self.speech_model,
                input,
                voice: &self.voice,
                response_format: "mp3",
            })
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(PROVIDER, status, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;
        if bytes.is_empty() {
            return Err(ProviderError::empty(PROVIDER, "empty audio body"));
        }
        Ok(audio_data_url(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_image_response() {
        let body = json!({"created": 1, "data": [{"b64_json": "iVBORw0KGgo=", "revised_prompt": "x"}]});
        assert_eq!(
            parse_image_response(&body).unwrap(),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn test_image_response_without_data_is_empty() {
        let err = parse_image_response(&json!({"data": []})).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyPayload { .. }));
    }

    #[test]
    fn test_audio_data_url() {
        assert_eq!(audio_data_url(b"ID3"), "data:audio/mpeg;base64,SUQz");
    }

    #[test]
    fn test_speech_input_is_char_bounded() {
        let long = "é".repeat(MAX_SPEECH_CHARS + 10);
        assert_eq!(speech_input(&long).chars().count(), MAX_SPEECH_CHARS);
        assert_eq!(speech_input("short"), "short");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ImageRequest {
            model: "dall-e-3",
            prompt: "a bull",
            n: 1,
            size: "1024x1024",
            response_format: "b64_json",
        })
        .unwrap();
        assert_eq!(body["response_format"], "b64_json");
        assert_eq!(body["n"], 1);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let config = FileOpenAiConfig {
            api_key_env: "FINQUERY_TEST_UNSET_OPENAI_KEY".to_string(),
            ..FileOpenAiConfig::default()
        };
        let client = OpenAiClient::new(reqwest::Client::new(), &config, "alloy");
        assert_eq!(
            client.synthesize("hello").await,
            Err(ProviderError::MissingCredential("OpenAI".to_string()))
        );
    }
}
