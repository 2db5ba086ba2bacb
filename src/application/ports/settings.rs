//! Settings Port - 宿主配置访问抽象

/// 宿主提供的配置项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ApiKey,
    Url,
    Model,
    VoiceIdentifier,
    ResponseFormat,
    VoiceName,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ApiKey => "api_key",
            SettingKey::Url => "url",
            SettingKey::Model => "model",
            SettingKey::VoiceIdentifier => "voice",
            SettingKey::ResponseFormat => "response_format",
            SettingKey::VoiceName => "voice_name",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings Port
///
/// 每次合成调用都会重新读取，宿主可以在调用之间修改配置
pub trait SettingsPort: Send + Sync {
    /// 读取配置值，未设置时返回 `None`
    fn get(&self, key: SettingKey) -> Option<String>;

    /// 读取配置值，空白字符串视同未设置
    fn get_non_blank(&self, key: SettingKey) -> Option<String> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }
}
