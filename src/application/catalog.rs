//! Voice Catalog - 采样率、语言与音色查询
//!
//! 只回显当前配置，不访问远端服务

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{SettingKey, SettingsPort};
use crate::domain::{AudioFormat, SAMPLE_RATE};

/// 唯一支持的语言
pub const DEFAULT_LOCALE: &str = "zh-CN";
pub const DEFAULT_LOCALE_NAME: &str = "中文 (简体)";
/// 未配置显示名称时使用的音色名
pub const DEFAULT_VOICE_NAME: &str = "默认语音";

/// 音色描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceDescriptor {
    pub name: String,
}

pub struct VoiceCatalog {
    settings: Arc<dyn SettingsPort>,
}

impl VoiceCatalog {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    /// 所有语言与音色都使用固定采样率
    pub fn sample_rate_for(&self, _locale: &str, _voice: &str) -> u32 {
        SAMPLE_RATE
    }

    pub fn list_locales(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(DEFAULT_LOCALE.to_string(), DEFAULT_LOCALE_NAME.to_string())])
    }

    /// 列出语言下的音色
    ///
    /// 仅 `zh-CN` 且配置了音色标识时返回唯一一项，其余情况返回空
    pub fn list_voices(&self, locale: &str) -> BTreeMap<String, VoiceDescriptor> {
        if locale != DEFAULT_LOCALE {
            return BTreeMap::new();
        }

        let Some(voice_id) = self.settings.get_non_blank(SettingKey::VoiceIdentifier) else {
            return BTreeMap::new();
        };
        let name = self
            .settings
            .get_non_blank(SettingKey::VoiceName)
            .unwrap_or_else(|| DEFAULT_VOICE_NAME.to_string());

        BTreeMap::from([(voice_id, VoiceDescriptor { name })])
    }

    /// 当前配置的输出格式，未配置或无法识别时为 WAV
    pub fn response_format(&self) -> AudioFormat {
        self.settings
            .get_non_blank(SettingKey::ResponseFormat)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}
