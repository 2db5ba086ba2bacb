//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod settings;
mod speech_transport;

pub use settings::{SettingKey, SettingsPort};
pub use speech_transport::{SpeechTransportPort, TransportError, TransportResponse};
