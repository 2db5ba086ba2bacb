//! Stats Handler - 自适应状态快照

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ContextSnapshot;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ContextSnapshot>> {
    Json(ApiResponse::success(state.context.snapshot()))
}
