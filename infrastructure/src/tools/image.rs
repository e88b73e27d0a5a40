//! `generate_image`: text-to-image, returned as a `data:` URL.

use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use finquery_application::ports::data_providers::ImageProvider;
use finquery_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter},
    payload,
    value_objects::{ToolError, ToolOutcome},
};
use std::sync::Arc;
use tracing::debug;

/// Create the [`ToolDefinition`] for `generate_image`.
pub fn generate_image_definition() -> ToolDefinition {
    ToolDefinition::for_kind(
        ToolKind::ImageGeneration,
        "Generate an image from a text description. Only use this when the user explicitly \
         asks for an image, picture or illustration.",
    )
    .with_parameter(ToolParameter::new(
        "prompt",
        "Detailed description of the image to generate",
        true,
    ))
}

/// Image generation backed by an [`ImageProvider`]
pub struct ImageGenerationTool {
    provider: Arc<dyn ImageProvider>,
}

impl ImageGenerationTool {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ToolHandler for ImageGenerationTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ImageGeneration
    }

    fn definition(&self) -> ToolDefinition {
        generate_image_definition()
    }

    async fn run(&self, call: &ToolCall) -> ToolOutcome {
        let name = ToolKind::ImageGeneration.name();
        let prompt = match call.require_string("prompt") {
            Ok(p) => p,
            Err(e) => return ToolOutcome::failure(name, ToolError::invalid_argument(e)),
        };

        debug!(prompt_len = prompt.len(), "Generating image");
        match self.provider.generate(prompt).await {
            Ok(url) if url.trim().is_empty() => {
                ToolOutcome::failure(name, ToolError::empty_result("No image was generated"))
            }
            Ok(url) => ToolOutcome::success(
                name,
                serde_json::json!({ "prompt": prompt, payload::IMAGE_URL: url }),
            ),
            Err(e) => ToolOutcome::failure(name, e.into_tool_error("the image")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::FakeImages;
    use finquery_application::ports::data_providers::ProviderError;

    fn image_call() -> ToolCall {
        ToolCall::for_kind(ToolKind::ImageGeneration).with_arg("prompt", "a bull market")
    }

    #[tokio::test]
    async fn test_image_url_in_payload() {
        let tool = ImageGenerationTool::new(Arc::new(FakeImages::default()));

        let outcome = tool.run(&image_call()).await;

        let url = outcome.success_payload().unwrap()[payload::IMAGE_URL]
            .as_str()
            .unwrap()
            .to_string();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(outcome.chart_series().is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_is_upstream_error() {
        let tool = ImageGenerationTool::new(Arc::new(FakeImages {
            error: Some(ProviderError::RateLimited {
                provider: "OpenAI".to_string(),
                message: "slow down".to_string(),
            }),
        }));

        let outcome = tool.run(&image_call()).await;
        let error = outcome.error().unwrap();
        assert_eq!(error.code, "UPSTREAM_ERROR");
        assert_eq!(error.message, "Failed to fetch the image");
    }
}
