//! OCR.space `/parse/image` client

use super::{require_key, send_json};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use finquery_application::ports::data_providers::{ImageUpload, OcrProvider, ProviderError};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

const PROVIDER: &str = "OCR.space";

/// Client for OCR.space text extraction
pub struct OcrSpaceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OcrSpaceClient {
    pub fn new(client: reqwest::Client, config: &FileProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
        }
    }
}

fn error_message(body: &Value) -> String {
    match body.get("ErrorMessage") {
        Some(Value::Array(lines)) => lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        Some(Value::String(line)) => line.clone(),
        _ => "processing failed".to_string(),
    }
}

/// Join the text of every parsed page.
pub fn parse_ocr_response(body: &Value) -> Result<String, ProviderError> {
    if body
        .get("IsErroredOnProcessing")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Err(ProviderError::invalid(PROVIDER, error_message(body)));
    }

    let text = body
        .get("ParsedResults")
        .and_then(Value::as_array)
        .map(|pages| {
            pages
                .iter()
                .filter_map(|p| p.get("ParsedText").and_then(Value::as_str))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::empty(PROVIDER, "no text recognized"));
    }
    Ok(text)
}

#[async_trait]
impl OcrProvider for OcrSpaceClient {
    async fn extract_text(&self, image: &ImageUpload) -> Result<String, ProviderError> {
        let key = require_key(PROVIDER, &self.api_key)?;
        debug!(file = %image.file_name, bytes = image.bytes.len(), "OCR request");

        let file = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ProviderError::invalid(PROVIDER, e))?;
        let form = Form::new()
            .part("file", file)
            .text("language", "eng")
            .text("OCREngine", "2");

        let request = self
            .client
            .post(format!("{}/parse/image", self.base_url))
            .header("apikey", key)
            .multipart(form);
        parse_ocr_response(&send_json(PROVIDER, request).await?)
    }
}
