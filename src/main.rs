//! Adaptive TTS - 语音合成 HTTP 服务
//!
//! 加载配置，组装传输、配置访问与自适应上下文，启动 HTTP 接口

use std::sync::Arc;

use adaptive_tts::application::AdaptiveContext;
use adaptive_tts::config::{load_config, print_config, LogConfig};
use adaptive_tts::infrastructure::adapters::{
    ConfigSettings, ReqwestTransport, ReqwestTransportConfig,
};
use adaptive_tts::infrastructure::http::{AppState, HttpServer};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},adaptive_tts={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Adaptive TTS - 网络自适应语音合成服务");
    print_config(&config);

    let transport = Arc::new(ReqwestTransport::new(
        ReqwestTransportConfig::default().with_timeout(config.tts.timeout_secs),
    )?);
    let settings = Arc::new(ConfigSettings::new(config.tts.clone()));
    let context = Arc::new(AdaptiveContext::new());

    let state = AppState::new(transport, settings, context);
    let server = HttpServer::new(config.server.addr(), state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
