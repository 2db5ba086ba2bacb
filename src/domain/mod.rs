//! Domain Layer - 领域层
//!
//! - reliability: 网络质量、流式检测、退避与请求头策略
//! - audio: 音频格式与返回数据校验

pub mod audio;
pub mod reliability;

pub use audio::{AudioFormat, AudioPayloadError, MIN_PAYLOAD_BYTES, SAMPLE_RATE};
pub use reliability::{
    build_headers, BackoffPolicy, ConnectionQuality, NetworkState, PerformanceStats,
    StreamingState,
};
