//! Route handlers

use crate::http::dto::{IndicatorRequest, OcrResponse, QueryRequest, QueryResponse};
use crate::http::error::ApiError;
use crate::http::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use finquery_application::{AnswerQueryInput, ImageUpload};
use finquery_domain::tool::payload;
use serde_json::{Value, json};
use tracing::info;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /api/tools
pub async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "tools": state.tools.as_ref(),
        "count": state.tools.len(),
    }))
}

/// POST /api/query
pub async fn answer_query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = body?;
    let output = state
        .answer
        .execute(AnswerQueryInput::new(request.query))
        .await?;

    info!(
        tool = output.tool_name.as_deref().unwrap_or("none"),
        "Query answered"
    );
    Ok(Json(output.envelope.into()))
}

/// POST /api/economic-indicator
pub async fn economic_indicator(
    State(state): State<AppState>,
    body: Result<Json<IndicatorRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    let payload = state.lookup.execute(request.into()).await?;
    Ok(Json(payload))
}

/// POST /api/ocr
pub async fn extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OcrResponse>, ApiError> {
    let upload = read_image_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::bad_request(format!("Missing '{}' field", IMAGE_FIELD)))?;

    let result = state.ocr.execute(upload).await.into_result();
    let payload = result.map_err(ApiError::from_tool_error)?;
    let text = payload
        .get(payload::TEXT)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(Json(OcrResponse { text }))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<Option<ImageUpload>, ApiError> {
    let invalid = |e: MultipartError| {
        ApiError::bad_request("Invalid multipart body").with_details(e.body_text())
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.png").to_string();
        let content_type = field.content_type().unwrap_or("image/png").to_string();
        let bytes = field.bytes().await.map_err(invalid)?;
        return Ok(Some(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}
