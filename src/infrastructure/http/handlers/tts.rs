//! TTS Handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 合成音频
///
/// 成功时直接返回音频字节；请求体无法解析时返回 400，合成失败都折叠为同一个 503 业务错误
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SynthesizeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    let audio = state
        .synthesizer
        .synthesize(req.text.as_deref(), req.rate)
        .await
        .ok_or_else(|| ApiError::ServiceUnavailable("synthesis failed".to_string()))?;

    let format = state.catalog.response_format();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(header::CONTENT_LENGTH, audio.len())
        .body(Body::from(audio))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
