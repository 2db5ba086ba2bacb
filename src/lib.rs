//! Adaptive TTS - 网络自适应的语音合成客户端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Reliability: 网络质量评估、流式检测、退避与请求头策略
//! - Audio: 音频格式与返回数据校验
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechTransport, Settings）
//! - SpeechSynthesizer: 自适应重试合成
//! - VoiceCatalog: 采样率、语言与音色查询
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: reqwest 传输、配置访问、测试用 Fake 传输
//! - HTTP: RESTful API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{AdaptiveContext, SpeechSynthesizer, SynthesisError, VoiceCatalog};
pub use config::{load_config, AppConfig};
