//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechTransport、Settings）
//! - context: 跨调用共享的自适应状态
//! - synthesizer: 自适应重试合成
//! - catalog: 采样率、语言与音色查询
//! - error: 应用层错误定义

pub mod catalog;
pub mod context;
pub mod error;
pub mod ports;
pub mod synthesizer;

pub use catalog::{VoiceCatalog, VoiceDescriptor};
pub use context::{AdaptiveContext, ContextSnapshot};
pub use error::SynthesisError;
pub use ports::{
    SettingKey, SettingsPort, SpeechTransportPort, TransportError, TransportResponse,
};
pub use synthesizer::{speed_for_rate, AudioRequest, SpeechSynthesizer};
