//! Config Settings - 基于应用配置的 SettingsPort 实现

use crate::application::ports::{SettingKey, SettingsPort};
use crate::config::TtsConfig;

pub struct ConfigSettings {
    config: TtsConfig,
}

impl ConfigSettings {
    pub fn new(config: TtsConfig) -> Self {
        Self { config }
    }
}

impl SettingsPort for ConfigSettings {
    fn get(&self, key: SettingKey) -> Option<String> {
        let config = &self.config;
        match key {
            SettingKey::ApiKey => config.api_key.clone(),
            SettingKey::Url => Some(config.url.clone()),
            SettingKey::Model => Some(config.model.clone()),
            SettingKey::VoiceIdentifier => Some(config.voice.clone()),
            SettingKey::ResponseFormat => Some(config.response_format.clone()),
            SettingKey::VoiceName => Some(config.voice_name.clone()),
        }
    }
}
