//! Streaming Mode - 流式调用节奏检测
//!
//! 宿主以紧凑的节奏连续调用时（例如逐句朗读），判定为流式模式

use serde::Serialize;
use tokio::time::Instant;

/// 新间隔在均值中的权重
const INTERVAL_WEIGHT: f64 = 0.2;
/// 平均间隔初值（毫秒）
const INITIAL_INTERVAL_MS: f64 = 5000.0;
/// 平均间隔低于该值即视为流式模式
const STREAM_INTERVAL_THRESHOLD_MS: f64 = 5000.0;

/// 流式状态
#[derive(Debug, Clone, Serialize)]
pub struct StreamingState {
    is_stream_mode: bool,
    request_count: u64,
    #[serde(skip)]
    last_request_at: Option<Instant>,
    avg_interval_ms: f64,
}

impl Default for StreamingState {
    fn default() -> Self {
        Self {
            is_stream_mode: false,
            request_count: 0,
            last_request_at: None,
            avg_interval_ms: INITIAL_INTERVAL_MS,
        }
    }
}

impl StreamingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次顶层调用并返回当前是否处于流式模式
    ///
    /// 每次顶层调用只应调用一次，且在任何重试之前。
    /// 首次调用没有上一次时间戳，不更新间隔均值。
    pub fn detect(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_request_at {
            let interval_ms = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
            self.avg_interval_ms =
                self.avg_interval_ms * (1.0 - INTERVAL_WEIGHT) + interval_ms * INTERVAL_WEIGHT;
            self.is_stream_mode = self.avg_interval_ms < STREAM_INTERVAL_THRESHOLD_MS;
        }

        self.last_request_at = Some(now);
        self.request_count += 1;

        self.is_stream_mode
    }

    pub fn is_stream_mode(&self) -> bool {
        self.is_stream_mode
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn avg_interval_ms(&self) -> f64 {
        self.avg_interval_ms
    }

    pub fn last_request_at(&self) -> Option<Instant> {
        self.last_request_at
    }
}
