//! Reqwest Transport - 基于 reqwest 的 HTTP 传输
//!
//! 实现 SpeechTransportPort trait，把引擎构建的请求发送到远端 TTS 服务
//!
//! 远端 API (SiliconFlow 兼容):
//! POST https://api.siliconflow.cn/v1/audio/speech
//! Request: {"model", "input", "voice", "response_format", "speed", "sample_rate"}  (JSON)
//! Response: 200 + 音频二进制

use async_trait::async_trait;
use http::HeaderMap;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{SpeechTransportPort, TransportError, TransportResponse};

/// 传输层配置
#[derive(Debug, Clone)]
pub struct ReqwestTransportConfig {
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ReqwestTransportConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

impl ReqwestTransportConfig {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// reqwest HTTP 传输
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 创建新的传输实例
    pub fn new(config: ReqwestTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(format!("Cannot connect to TTS service: {}", e))
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl SpeechTransportPort for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        json_body: &str,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(url = %url, body_len = json_body.len(), "Sending TTS request");

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(json_body.to_owned())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        tracing::debug!(status, size = body.len(), "TTS response read");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ReqwestTransportConfig::default();
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = ReqwestTransportConfig::default().with_timeout(30);
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let transport = ReqwestTransport::new(ReqwestTransportConfig::default().with_timeout(2))
            .unwrap();
        // 端口 9 (discard) 在本地通常无人监听
        let result = transport
            .post("http://127.0.0.1:9/v1/audio/speech", "{}", HeaderMap::new())
            .await;
        assert!(result.is_err());
    }
}
