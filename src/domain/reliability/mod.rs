//! Reliability Context - 自适应请求可靠性
//!
//! - network: 网络质量评估
//! - streaming: 流式调用节奏检测
//! - backoff: 重试等待时间计算
//! - headers: 按网络状态构建请求头
//! - stats: 性能统计

mod backoff;
mod headers;
mod network;
mod stats;
mod streaming;

pub use backoff::BackoffPolicy;
pub use headers::{build_headers, CLIENT_USER_AGENT};
pub use network::{ConnectionQuality, NetworkState};
pub use stats::PerformanceStats;
pub use streaming::StreamingState;
