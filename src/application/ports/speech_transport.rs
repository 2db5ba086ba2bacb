//! Speech Transport Port - 语音合成 HTTP 传输抽象
//!
//! 引擎只负责构建请求并消费 `(status, body)`，连接、TLS 与字节传输由适配器完成

use async_trait::async_trait;
use http::HeaderMap;
use thiserror::Error;

/// 传输层错误
///
/// 均视为网络失败，由重试循环在预算内重试
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// 传输层响应
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP 状态码
    pub status: u16,
    /// 原始响应体
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Speech Transport Port
///
/// 阻塞式（对调用方而言）的 HTTP POST 原语
#[async_trait]
pub trait SpeechTransportPort: Send + Sync {
    /// 发送 JSON 请求体并返回状态码与响应字节
    async fn post(
        &self,
        url: &str,
        json_body: &str,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError>;
}
