//! Fake Transport - 用于测试的传输实现
//!
//! 按脚本依次返回预设响应，脚本用完后重复兜底响应，不实际发出网络请求

use async_trait::async_trait;
use http::HeaderMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::application::ports::{SpeechTransportPort, TransportError, TransportResponse};

/// 预设响应
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// 返回指定状态码与响应体
    Status(TransportResponse),
    /// 模拟请求超时
    Timeout,
    /// 模拟连接失败
    ConnectFailure,
}

impl FakeReply {
    /// 200 + 指定音频
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::Status(TransportResponse::new(200, body))
    }

    /// 指定状态码 + 空响应体
    pub fn status(status: u16) -> Self {
        Self::Status(TransportResponse::new(status, Vec::new()))
    }

    fn into_result(self) -> Result<TransportResponse, TransportError> {
        match self {
            FakeReply::Status(response) => Ok(response),
            FakeReply::Timeout => Err(TransportError::Timeout),
            FakeReply::ConnectFailure => {
                Err(TransportError::Connect("connection refused".to_string()))
            }
        }
    }
}

/// 记录的请求
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub body: String,
    pub headers: HeaderMap,
}

/// Fake Transport
pub struct FakeTransport {
    script: Mutex<VecDeque<FakeReply>>,
    fallback: FakeReply,
    latency: Option<Duration>,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeTransport {
    /// 每次都返回同一响应
    pub fn always(reply: FakeReply) -> Self {
        Self::scripted(Vec::new(), reply)
    }

    /// 先按顺序返回 `script`，用完后重复 `fallback`
    pub fn scripted(script: Vec<FakeReply>, fallback: FakeReply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            latency: None,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// 每次请求前模拟的网络延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// 观察到的最大并发请求数
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> FakeReply {
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl SpeechTransportPort for FakeTransport {
    async fn post(
        &self,
        url: &str,
        json_body: &str,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        lock(&self.calls).push(RecordedCall {
            url: url.to_string(),
            body: json_body.to_string(),
            headers,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self.next_reply();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        tracing::debug!(
            url = %url,
            reply = %reply_kind(&reply),
            "FakeTransport: returning scripted reply"
        );
        reply.into_result()
    }
}

fn reply_kind(reply: &FakeReply) -> String {
    match reply {
        FakeReply::Status(response) => format!("{} ({} bytes)", response.status, response.body.len()),
        FakeReply::Timeout => "timeout".to_string(),
        FakeReply::ConnectFailure => "connect failure".to_string(),
    }
}
