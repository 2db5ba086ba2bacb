//! Application State
//!
//! 路由共享的合成器、音色目录与自适应上下文

use std::sync::Arc;

use crate::application::{
    AdaptiveContext, SettingsPort, SpeechSynthesizer, SpeechTransportPort, VoiceCatalog,
};

/// 应用状态
pub struct AppState {
    pub synthesizer: SpeechSynthesizer,
    pub catalog: VoiceCatalog,
    pub context: Arc<AdaptiveContext>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        transport: Arc<dyn SpeechTransportPort>,
        settings: Arc<dyn SettingsPort>,
        context: Arc<AdaptiveContext>,
    ) -> Self {
        Self {
            synthesizer: SpeechSynthesizer::new(transport, settings.clone(), context.clone()),
            catalog: VoiceCatalog::new(settings),
            context,
        }
    }
}
