//! Image text extraction (OCR).
//!
//! Not offered to the model. The upload endpoint calls this directly and
//! gets back the same success/error [`ToolOutcome`] shape the tools use.

use crate::ports::data_providers::{ImageUpload, OcrProvider};
use finquery_domain::tool::payload;
use finquery_domain::tool::value_objects::{ToolError, ToolOutcome};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome name used for OCR results
pub const EXTRACT_TEXT: &str = "extract_text";

/// Upper bound on accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Use case for the OCR upload endpoint.
#[derive(Clone)]
pub struct ExtractTextUseCase {
    ocr: Arc<dyn OcrProvider>,
}

impl ExtractTextUseCase {
    pub fn new(ocr: Arc<dyn OcrProvider>) -> Self {
        Self { ocr }
    }

    pub async fn execute(&self, image: ImageUpload) -> ToolOutcome {
        if image.bytes.is_empty() {
            return ToolOutcome::failure(
                EXTRACT_TEXT,
                ToolError::invalid_argument("Uploaded image is empty"),
            );
        }
        if image.bytes.len() > MAX_IMAGE_BYTES {
            return ToolOutcome::failure(
                EXTRACT_TEXT,
                ToolError::invalid_argument(format!(
                    "Uploaded image is {} bytes; the limit is {} bytes",
                    image.bytes.len(),
                    MAX_IMAGE_BYTES
                )),
            );
        }

        info!(
            "Extracting text from {} ({} bytes)",
            image.file_name,
            image.bytes.len()
        );
        let start = Instant::now();
        let outcome = match self.ocr.extract_text(&image).await {
            Ok(text) if text.trim().is_empty() => ToolOutcome::failure(
                EXTRACT_TEXT,
                ToolError::empty_result("No text found in the image"),
            ),
            Ok(text) => ToolOutcome::success(
                EXTRACT_TEXT,
                serde_json::json!({ payload::TEXT: text.trim() }),
            ),
            Err(e) => ToolOutcome::failure(EXTRACT_TEXT, e.into_tool_error("text from the image")),
        };
        let duration_ms = start.elapsed().as_millis() as u64;
        debug!("OCR finished in {}ms", duration_ms);

        outcome.with_duration(duration_ms)
    }
}
