//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: Option<String>,
    /// 语速提示 (0, 200]，50 为正常语速
    pub rate: Option<u32>,
}

// ============================================================================
// Catalog DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct VoicesQuery {
    pub locale: String,
}

#[derive(Debug, Deserialize)]
pub struct SampleRateQuery {
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub voice: String,
}

#[derive(Debug, Serialize)]
pub struct SampleRateResponse {
    pub sample_rate: u32,
}
