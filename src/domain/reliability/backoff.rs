//! Backoff - 重试等待时间计算
//!
//! 在基础等待时间上依次叠加质量、流式、指数退避、文本长度与连续失败系数

use std::time::Duration;

use super::network::NetworkState;
use super::streaming::StreamingState;

const STREAM_MULTIPLIER: f64 = 0.7;
const EXPONENTIAL_BASE: f64 = 1.6;
const LONG_TEXT_UNITS: usize = 200;
const LONG_TEXT_MULTIPLIER: f64 = 1.3;
const VERY_LONG_TEXT_UNITS: usize = 1000;
const VERY_LONG_TEXT_MULTIPLIER: f64 = 1.6;
const FAILURE_PENALTY_PER_POINT: f64 = 0.4;

/// 退避策略
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// 基础等待时间（毫秒）
    pub base_ms: f64,
    /// 等待时间下限（毫秒）
    pub min_ms: f64,
    /// 等待时间上限（毫秒）
    pub max_ms: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_ms: 300.0,
            min_ms: 100.0,
            max_ms: 8000.0,
        }
    }
}

impl BackoffPolicy {
    /// 计算第 `attempt` 次尝试（从 1 开始）前的等待毫秒数，结果落在 `[min_ms, max_ms]`
    pub fn wait_ms(
        &self,
        network: &NetworkState,
        streaming: &StreamingState,
        attempt: u32,
        text_length: usize,
    ) -> f64 {
        let mut wait = self.base_ms;

        wait *= network.connection_quality().wait_multiplier();

        if streaming.is_stream_mode() {
            wait *= STREAM_MULTIPLIER;
        }

        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        wait *= EXPONENTIAL_BASE.powi(exponent);

        // 两个长度阈值的系数叠加而非替换
        if text_length > LONG_TEXT_UNITS {
            wait *= LONG_TEXT_MULTIPLIER;
        }
        if text_length > VERY_LONG_TEXT_UNITS {
            wait *= VERY_LONG_TEXT_MULTIPLIER;
        }

        let failure_score = network.consecutive_failure_score();
        if failure_score > 0.0 {
            wait *= 1.0 + failure_score * FAILURE_PENALTY_PER_POINT;
        }

        wait.clamp(self.min_ms, self.max_ms)
    }

    /// 同 [`BackoffPolicy::wait_ms`]，四舍五入到毫秒
    pub fn wait_time(
        &self,
        network: &NetworkState,
        streaming: &StreamingState,
        attempt: u32,
        text_length: usize,
    ) -> Duration {
        let ms = self.wait_ms(network, streaming, attempt, text_length);
        Duration::from_millis(ms.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    fn stream_mode_state() -> StreamingState {
        let mut streaming = StreamingState::new();
        let base = Instant::now();
        streaming.detect(base);
        streaming.detect(base + Duration::from_millis(200));
        assert!(streaming.is_stream_mode());
        streaming
    }

    fn poor_network() -> NetworkState {
        let mut network = NetworkState::new();
        for _ in 0..3 {
            network.assess(100.0, false, 0);
        }
        network
    }

    #[test]
    fn test_first_attempt_on_good_network() {
        let policy = BackoffPolicy::default();
        let wait = policy.wait_time(&NetworkState::new(), &StreamingState::new(), 1, 0);
        assert_eq!(wait, Duration::from_millis(300));
    }

    #[test]
    fn test_streaming_shortens_wait() {
        let policy = BackoffPolicy::default();
        let wait = policy.wait_ms(&NetworkState::new(), &stream_mode_state(), 1, 0);
        assert!((wait - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_exponential_growth() {
        let policy = BackoffPolicy::default();
        let network = NetworkState::new();
        let streaming = StreamingState::new();
        assert!((policy.wait_ms(&network, &streaming, 2, 0) - 480.0).abs() < 1e-9);
        assert!((policy.wait_ms(&network, &streaming, 3, 0) - 768.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_multipliers_compose() {
        let policy = BackoffPolicy::default();
        let network = NetworkState::new();
        let streaming = StreamingState::new();

        assert!((policy.wait_ms(&network, &streaming, 1, 200) - 300.0).abs() < 1e-9);
        assert!((policy.wait_ms(&network, &streaming, 1, 201) - 390.0).abs() < 1e-9);
        assert!((policy.wait_ms(&network, &streaming, 1, 1001) - 624.0).abs() < 1e-9);
    }

    #[test]
    fn test_poor_network_with_failure_penalty() {
        let policy = BackoffPolicy::default();
        // 300 * 3.0 * (1 + 3 * 0.4) = 1980
        let wait = policy.wait_ms(&poor_network(), &StreamingState::new(), 1, 0);
        assert!((wait - 1980.0).abs() < 1e-9);
    }

    #[test]
    fn test_wait_clamped_to_bounds() {
        let policy = BackoffPolicy::default();
        let network = poor_network();
        let streaming = StreamingState::new();
        assert_eq!(
            policy.wait_time(&network, &streaming, 20, 5000),
            Duration::from_millis(8000)
        );

        let tiny = BackoffPolicy {
            base_ms: 10.0,
            ..BackoffPolicy::default()
        };
        assert_eq!(
            tiny.wait_time(&NetworkState::new(), &streaming, 1, 0),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_wait_is_monotonic_in_attempt() {
        let policy = BackoffPolicy::default();
        let states = [NetworkState::new(), poor_network()];
        let modes = [StreamingState::new(), stream_mode_state()];

        for network in &states {
            for streaming in &modes {
                for text_length in [0, 250, 1500] {
                    let mut previous = 0.0;
                    for attempt in 1..=12 {
                        let wait = policy.wait_ms(network, streaming, attempt, text_length);
                        assert!(wait >= previous);
                        assert!((100.0..=8000.0).contains(&wait));
                        previous = wait;
                    }
                }
            }
        }
    }
}
