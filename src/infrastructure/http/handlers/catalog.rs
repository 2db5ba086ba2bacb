//! Catalog Handlers - 语言、音色与采样率

use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::VoiceDescriptor;
use crate::infrastructure::http::dto::{
    ApiResponse, SampleRateQuery, SampleRateResponse, VoicesQuery,
};
use crate::infrastructure::http::state::AppState;

/// 列出支持的语言
pub async fn list_locales(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<BTreeMap<String, String>>> {
    Json(ApiResponse::success(state.catalog.list_locales()))
}

/// 列出语言下的音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VoicesQuery>,
) -> Json<ApiResponse<BTreeMap<String, VoiceDescriptor>>> {
    Json(ApiResponse::success(state.catalog.list_voices(&query.locale)))
}

/// 查询采样率
pub async fn sample_rate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SampleRateQuery>,
) -> Json<ApiResponse<SampleRateResponse>> {
    let sample_rate = state.catalog.sample_rate_for(&query.locale, &query.voice);
    Json(ApiResponse::success(SampleRateResponse { sample_rate }))
}
