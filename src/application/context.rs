//! Adaptive Context - 自适应状态上下文
//!
//! 网络状态、流式状态与性能统计在进程生命周期内持续演化。
//! 这里把它们收拢为显式的上下文对象，由合成器持有并在每次调用中使用，
//! 测试可以各自创建独立的上下文。

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::header::{HeaderMap, InvalidHeaderValue};
use serde::Serialize;
use tokio::time::Instant;

use crate::domain::{
    build_headers, BackoffPolicy, ConnectionQuality, NetworkState, PerformanceStats,
    StreamingState,
};

#[derive(Debug, Default)]
struct AdaptiveState {
    network: NetworkState,
    streaming: StreamingState,
    stats: PerformanceStats,
    last_request_wall: Option<DateTime<Utc>>,
}

/// 上下文快照（诊断用）
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    pub network: NetworkState,
    pub streaming: StreamingState,
    pub stats: PerformanceStats,
    pub last_request_at: Option<DateTime<Utc>>,
}

/// 自适应上下文
///
/// 内部锁只在同步方法内短暂持有，不跨越 `.await`
#[derive(Debug, Default)]
pub struct AdaptiveContext {
    state: Mutex<AdaptiveState>,
}

impl AdaptiveContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AdaptiveState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 记录一次顶层调用并返回是否处于流式模式
    pub fn detect_streaming(&self, now: Instant) -> bool {
        let mut state = self.lock();
        state.last_request_wall = Some(Utc::now());
        state.streaming.detect(now)
    }

    /// 记录一次请求尝试的结果，返回更新后的网络状态
    pub fn assess(&self, response_time_ms: f64, success: bool, data_size: usize) -> NetworkState {
        let mut state = self.lock();
        state.stats.record_request();
        if success {
            state.stats.add_time(response_time_ms);
        }
        state
            .network
            .assess(response_time_ms, success, data_size)
            .clone()
    }

    pub fn record_optimization(&self) {
        self.lock().stats.record_optimization();
    }

    /// 累加一次成功调用的总耗时
    pub fn record_call_time(&self, elapsed_ms: f64) {
        self.lock().stats.add_time(elapsed_ms);
    }

    pub fn quality(&self) -> ConnectionQuality {
        self.lock().network.connection_quality()
    }

    pub fn is_stream_mode(&self) -> bool {
        self.lock().streaming.is_stream_mode()
    }

    /// 按当前状态计算重试前的等待时间
    pub fn wait_time(&self, policy: &BackoffPolicy, attempt: u32, text_length: usize) -> Duration {
        let state = self.lock();
        policy.wait_time(&state.network, &state.streaming, attempt, text_length)
    }

    /// 按当前状态构建请求头
    pub fn build_headers(&self, api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
        let state = self.lock();
        build_headers(
            api_key,
            state.network.connection_quality(),
            state.streaming.is_stream_mode(),
        )
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        let state = self.lock();
        ContextSnapshot {
            network: state.network.clone(),
            streaming: state.streaming.clone(),
            stats: state.stats.clone(),
            last_request_at: state.last_request_wall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_updates_stats() {
        let context = AdaptiveContext::new();
        context.assess(400.0, true, 100_000);
        context.assess(250.0, false, 0);
        context.record_optimization();

        let snapshot = context.snapshot();
        assert_eq!(snapshot.stats.total_requests, 2);
        assert_eq!(snapshot.stats.network_optimizations, 1);
        assert!((snapshot.stats.total_time_ms - 400.0).abs() < 1e-9);
        assert_eq!(snapshot.network.consecutive_failure_score(), 1.0);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let first = AdaptiveContext::new();
        let second = AdaptiveContext::new();
        for _ in 0..3 {
            first.assess(100.0, false, 0);
        }
        assert_eq!(first.quality(), ConnectionQuality::Poor);
        assert_eq!(second.quality(), ConnectionQuality::Good);
    }

    #[test]
    fn test_headers_follow_quality() {
        let context = AdaptiveContext::new();
        let headers = context.build_headers("k").unwrap();
        assert_eq!(headers.get("connection").unwrap(), "keep-alive");

        for _ in 0..3 {
            context.assess(100.0, false, 0);
        }
        let headers = context.build_headers("k").unwrap();
        assert_eq!(headers.get("connection").unwrap(), "close");
    }

    #[test]
    fn test_detect_streaming_records_wall_clock() {
        let context = AdaptiveContext::new();
        assert!(context.snapshot().last_request_at.is_none());
        assert!(!context.detect_streaming(Instant::now()));
        let snapshot = context.snapshot();
        assert!(snapshot.last_request_at.is_some());
        assert_eq!(snapshot.streaming.request_count(), 1);
    }
}
