//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::AudioFormat;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `ADAPTIVE_TTS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `ADAPTIVE_TTS_SERVER__PORT=8080`
/// - `ADAPTIVE_TTS_TTS__API_KEY=sk-xxx`
/// - `ADAPTIVE_TTS_TTS__VOICE=speech:my-voice`
/// - `ADAPTIVE_TTS_TTS__RESPONSE_FORMAT=mp3`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("tts.url", "https://api.siliconflow.cn/v1/audio/speech")?
        .set_default("tts.model", "FunAudioLLM/CosyVoice2-0.5B")?
        .set_default("tts.voice", "中文女")?
        .set_default("tts.response_format", "wav")?
        .set_default("tts.voice_name", "默认语音")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: ADAPTIVE_TTS_TTS__API_KEY=sk-xxx
    builder = builder.add_source(
        Environment::with_prefix("ADAPTIVE_TTS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// API Key 等字段允许缺失：缺失时合成调用返回失败，而不是阻止启动
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    if !config.tts.response_format.trim().is_empty() {
        config
            .tts
            .response_format
            .parse::<AudioFormat>()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Model: {}", config.tts.model);
    tracing::info!("TTS Voice: {} ({})", config.tts.voice, config.tts.voice_name);
    tracing::info!("TTS Format: {}", config.tts.response_format);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    match config.tts.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => tracing::info!("TTS API Key: configured"),
        _ => tracing::warn!("TTS API Key: missing, synthesis requests will fail"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.tts.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_unknown_format() {
        let mut config = AppConfig::default();
        config.tts.response_format = "flac".to_string();
        assert!(validate_config(&config).is_err());

        config.tts.response_format = "MP3".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[tts]
api_key = "sk-file"
voice = "speech:narrator"
response_format = "mp3"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.tts.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.tts.voice, "speech:narrator");
        assert_eq!(config.tts.response_format, "mp3");
        // 未覆盖的字段保留默认值
        assert_eq!(config.tts.model, "FunAudioLLM/CosyVoice2-0.5B");
        assert_eq!(config.tts.timeout_secs, 120);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tts]\nresponse_format = \"aiff\"").unwrap();
        assert!(load_config_from_path(Some(file.path())).is_err());
    }
}
