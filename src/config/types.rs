//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// API Key（sk- 开头），未设置时合成请求直接失败
    #[serde(default)]
    pub api_key: Option<String>,

    /// 完整的合成接口地址
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 音色标识（预设音色或自定义音色 ID）
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 音频格式: wav, mp3, opus
    #[serde(default = "default_response_format")]
    pub response_format: String,

    /// 音色显示名称
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_url() -> String {
    "https://api.siliconflow.cn/v1/audio/speech".to_string()
}

fn default_model() -> String {
    "FunAudioLLM/CosyVoice2-0.5B".to_string()
}

fn default_voice() -> String {
    "中文女".to_string()
}

fn default_response_format() -> String {
    "wav".to_string()
}

fn default_voice_name() -> String {
    "默认语音".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: default_tts_url(),
            model: default_model(),
            voice: default_voice(),
            response_format: default_response_format(),
            voice_name: default_voice_name(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
