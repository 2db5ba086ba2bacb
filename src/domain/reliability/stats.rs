//! Performance Stats - 性能统计
//!
//! 仅用于监控，不参与重试决策

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceStats {
    /// 已评估的请求尝试次数
    pub total_requests: u64,
    /// 累计耗时（毫秒）
    pub total_time_ms: f64,
    /// 收到非空 200 响应的次数
    pub network_optimizations: u64,
}

impl PerformanceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&mut self) {
        self.total_requests += 1;
    }

    pub fn add_time(&mut self, elapsed_ms: f64) {
        self.total_time_ms += elapsed_ms;
    }

    pub fn record_optimization(&mut self) {
        self.network_optimizations += 1;
    }
}
