//! Settings Adapter - 配置访问实现

mod config_settings;

pub use config_settings::ConfigSettings;
