//! Network Quality - 网络质量评估
//!
//! 根据最近请求的耗时、吞吐量和连续失败分数，滚动评估链路质量

use serde::Serialize;

/// 新样本在响应时间均值中的权重
const RESPONSE_TIME_WEIGHT: f64 = 0.3;
/// 初始平均响应时间（毫秒）
const INITIAL_RESPONSE_TIME_MS: f64 = 1000.0;

const GOOD_LATENCY_MS: f64 = 1500.0;
const GOOD_THROUGHPUT: f64 = 50.0;
const FAIR_LATENCY_MS: f64 = 3000.0;
const FAIR_THROUGHPUT: f64 = 20.0;

/// 连续失败分数达到该值时强制判定为 Poor
const POOR_FAILURE_SCORE: f64 = 3.0;

/// 连接质量等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionQuality {
    #[default]
    Good,
    Fair,
    Poor,
}

impl ConnectionQuality {
    /// 该质量等级下单次调用允许的最大尝试次数
    pub fn retry_budget(&self) -> u32 {
        match self {
            ConnectionQuality::Good => 3,
            ConnectionQuality::Fair => 4,
            ConnectionQuality::Poor => 5,
        }
    }

    /// 等待时间的质量系数
    pub fn wait_multiplier(&self) -> f64 {
        match self {
            ConnectionQuality::Good => 1.0,
            ConnectionQuality::Fair => 1.8,
            ConnectionQuality::Poor => 3.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionQuality::Good => "good",
            ConnectionQuality::Fair => "fair",
            ConnectionQuality::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ConnectionQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 网络状态
///
/// `connection_quality` 与 `is_slow_network` 只能由 [`NetworkState::assess`] 推导，
/// 始终反映最近一次记录的请求结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkState {
    consecutive_failure_score: f64,
    avg_response_time_ms: f64,
    connection_quality: ConnectionQuality,
    is_slow_network: bool,
    /// 最近一次成功请求的吞吐量（字节/毫秒）
    last_throughput: Option<f64>,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self {
            consecutive_failure_score: 0.0,
            avg_response_time_ms: INITIAL_RESPONSE_TIME_MS,
            connection_quality: ConnectionQuality::Good,
            is_slow_network: false,
            last_throughput: None,
        }
    }
}

impl NetworkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次请求结果并更新质量评估
    ///
    /// # 参数
    /// - `response_time_ms` - 本次请求耗时（毫秒）
    /// - `success` - 请求是否成功
    /// - `data_size` - 成功时收到的字节数，失败时为 0
    pub fn assess(&mut self, response_time_ms: f64, success: bool, data_size: usize) -> &Self {
        if success {
            self.consecutive_failure_score = (self.consecutive_failure_score - 1.0).max(0.0);
            self.avg_response_time_ms = self.avg_response_time_ms * (1.0 - RESPONSE_TIME_WEIGHT)
                + response_time_ms * RESPONSE_TIME_WEIGHT;

            // 耗时为 0 时吞吐量为 +inf，视为极快
            let throughput = data_size as f64 / response_time_ms;
            self.last_throughput = Some(throughput);

            let (quality, slow) = if self.avg_response_time_ms < GOOD_LATENCY_MS
                && throughput > GOOD_THROUGHPUT
            {
                (ConnectionQuality::Good, false)
            } else if self.avg_response_time_ms < FAIR_LATENCY_MS && throughput > FAIR_THROUGHPUT {
                (ConnectionQuality::Fair, true)
            } else {
                (ConnectionQuality::Poor, true)
            };
            self.connection_quality = quality;
            self.is_slow_network = slow;
        } else {
            self.consecutive_failure_score += 1.0;
            if self.consecutive_failure_score >= POOR_FAILURE_SCORE {
                self.connection_quality = ConnectionQuality::Poor;
                self.is_slow_network = true;
            }
        }

        self
    }

    pub fn consecutive_failure_score(&self) -> f64 {
        self.consecutive_failure_score
    }

    pub fn avg_response_time_ms(&self) -> f64 {
        self.avg_response_time_ms
    }

    pub fn connection_quality(&self) -> ConnectionQuality {
        self.connection_quality
    }

    pub fn is_slow_network(&self) -> bool {
        self.is_slow_network
    }

    pub fn last_throughput(&self) -> Option<f64> {
        self.last_throughput
    }
}
