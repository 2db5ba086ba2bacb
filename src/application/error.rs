//! 应用层错误定义
//!
//! 公开的 `synthesize` 把所有错误折叠为 `None`，这里的结构化错误只供日志与
//! `try_synthesize` 调用方诊断使用

use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 没有可用的文本
    #[error("No usable text to synthesize")]
    NoInput,

    /// 配置缺失或非法，不重试
    #[error("Configuration error: {0}")]
    Config(String),

    /// 请求体编码失败
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// 重试预算耗尽
    #[error("Retry budget exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl SynthesisError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// 是否为不重试的终止性错误
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SynthesisError::Exhausted { .. })
    }
}
