//! Speech Synthesizer - 自适应重试合成
//!
//! 一次顶层调用的流程：
//! 1. 检测流式模式（每次调用一次，先于任何尝试）
//! 2. 校验输入文本
//! 3. 读取配置（缺失即终止，不重试）
//! 4. 构建请求头与请求体
//! 5. 按当前网络质量确定尝试次数，逐次请求，失败时按退避策略等待
//! 6. 返回第一个通过校验的音频，或在预算耗尽后失败

use std::sync::Arc;

use http::HeaderMap;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::context::AdaptiveContext;
use crate::application::error::SynthesisError;
use crate::application::ports::{SettingKey, SettingsPort, SpeechTransportPort};
use crate::domain::audio::validate_payload;
use crate::domain::{AudioFormat, BackoffPolicy, SAMPLE_RATE};

/// 未提供或不合法时使用的语速
pub const DEFAULT_RATE: u32 = 50;
/// 语速提示的上限
pub const MAX_RATE: u32 = 200;
const MIN_SPEED: f64 = 0.25;
const MAX_SPEED: f64 = 4.0;

/// 把宿主的语速提示 (0, 200] 换算为 speed 参数，超出范围的提示被忽略
pub fn speed_for_rate(rate: Option<u32>) -> f64 {
    let rate = rate
        .filter(|r| (1..=MAX_RATE).contains(r))
        .unwrap_or(DEFAULT_RATE);
    (rate as f64 / DEFAULT_RATE as f64).clamp(MIN_SPEED, MAX_SPEED)
}

/// TTS 请求体 (JSON)
#[derive(Debug, Clone, Serialize)]
pub struct AudioRequest {
    pub model: String,
    pub input: String,
    pub voice: String,
    pub response_format: AudioFormat,
    pub speed: f64,
    pub sample_rate: u32,
}

/// 一次调用所需的配置
#[derive(Debug, Clone)]
struct SynthesisTarget {
    api_key: String,
    url: String,
    model: String,
    voice: String,
    format: AudioFormat,
}

/// 单次尝试的结果
enum AttemptOutcome {
    /// 通过校验的音频
    Delivered(Vec<u8>),
    /// 失败，继续下一次尝试
    Failed,
}

/// 语音合成器
///
/// 同一时刻只处理一个调用：并发调用在内部排队，保证共享状态的更新顺序
pub struct SpeechSynthesizer {
    transport: Arc<dyn SpeechTransportPort>,
    settings: Arc<dyn SettingsPort>,
    context: Arc<AdaptiveContext>,
    backoff: BackoffPolicy,
    call_gate: Mutex<()>,
}

impl SpeechSynthesizer {
    pub fn new(
        transport: Arc<dyn SpeechTransportPort>,
        settings: Arc<dyn SettingsPort>,
        context: Arc<AdaptiveContext>,
    ) -> Self {
        Self {
            transport,
            settings,
            context,
            backoff: BackoffPolicy::default(),
            call_gate: Mutex::new(()),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn context(&self) -> &Arc<AdaptiveContext> {
        &self.context
    }

    /// 合成音频
    ///
    /// 成功返回音频字节；输入缺失、配置缺失、服务拒绝或重试耗尽均返回 `None`
    pub async fn synthesize(&self, text: Option<&str>, rate: Option<u32>) -> Option<Vec<u8>> {
        match self.try_synthesize(text, rate).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                if e.is_terminal() {
                    tracing::debug!(error = %e, "Synthesis skipped");
                } else {
                    tracing::warn!(error = %e, "Synthesis failed");
                }
                None
            }
        }
    }

    /// 合成音频，返回结构化错误
    pub async fn try_synthesize(
        &self,
        text: Option<&str>,
        rate: Option<u32>,
    ) -> Result<Vec<u8>, SynthesisError> {
        let span = tracing::info_span!("synthesize", request_id = %Uuid::new_v4());
        self.run(text, rate).instrument(span).await
    }

    async fn run(&self, text: Option<&str>, rate: Option<u32>) -> Result<Vec<u8>, SynthesisError> {
        let _gate = self.call_gate.lock().await;
        let call_started = Instant::now();

        let is_streaming = self.context.detect_streaming(call_started);

        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or(SynthesisError::NoInput)?;

        let target = self.load_target()?;

        let headers = self
            .context
            .build_headers(&target.api_key)
            .map_err(|e| SynthesisError::config(format!("invalid api key: {}", e)))?;

        let request = AudioRequest {
            model: target.model.clone(),
            input: text.trim().to_string(),
            voice: target.voice.clone(),
            response_format: target.format,
            speed: speed_for_rate(rate),
            sample_rate: SAMPLE_RATE,
        };
        let body = serde_json::to_string(&request)?;

        let text_length = text_length(text);
        let quality = self.context.quality();
        let max_attempts = quality.retry_budget();

        tracing::debug!(
            text_len = text_length,
            speed = request.speed,
            quality = %quality,
            streaming = is_streaming,
            max_attempts,
            "Starting synthesis"
        );

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let wait = self.context.wait_time(&self.backoff, attempt, text_length);
                tracing::debug!(
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    "Waiting before retry"
                );
                tokio::time::sleep(wait).await;
            }

            match self.attempt(attempt, &target, &body, headers.clone()).await {
                AttemptOutcome::Delivered(audio) => {
                    self.context.record_call_time(elapsed_ms(call_started));
                    tracing::info!(
                        attempt,
                        audio_size = audio.len(),
                        elapsed_ms = elapsed_ms(call_started),
                        "Synthesis completed"
                    );
                    return Ok(audio);
                }
                AttemptOutcome::Failed => continue,
            }
        }

        Err(SynthesisError::Exhausted {
            attempts: max_attempts,
        })
    }

    /// 执行单次请求并把结果反馈给网络质量评估
    async fn attempt(
        &self,
        attempt: u32,
        target: &SynthesisTarget,
        body: &str,
        headers: HeaderMap,
    ) -> AttemptOutcome {
        let started = Instant::now();
        let result = self.transport.post(&target.url, body, headers).await;
        let response_time_ms = elapsed_ms(started);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(attempt, error = %e, "TTS request failed");
                self.context.assess(response_time_ms, false, 0);
                return AttemptOutcome::Failed;
            }
        };

        if response.is_ok() && !response.body.is_empty() {
            let network = self
                .context
                .assess(response_time_ms, true, response.body.len());
            self.context.record_optimization();
            tracing::debug!(
                attempt,
                size = response.body.len(),
                response_time_ms,
                quality = %network.connection_quality(),
                "TTS response received"
            );

            match validate_payload(&response.body, target.format) {
                Ok(()) => return AttemptOutcome::Delivered(response.body),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Invalid audio payload");
                }
            }
        } else {
            tracing::warn!(
                attempt,
                status = response.status,
                size = response.body.len(),
                "TTS service rejected request"
            );
        }

        self.context.assess(response_time_ms, false, 0);
        AttemptOutcome::Failed
    }

    fn load_target(&self) -> Result<SynthesisTarget, SynthesisError> {
        let required = |key: SettingKey| {
            self.settings
                .get_non_blank(key)
                .ok_or_else(|| SynthesisError::config(format!("missing {}", key)))
        };

        let api_key = required(SettingKey::ApiKey)?;
        let url = required(SettingKey::Url)?;
        let model = required(SettingKey::Model)?;
        let voice = required(SettingKey::VoiceIdentifier)?;
        let format = match self.settings.get_non_blank(SettingKey::ResponseFormat) {
            Some(raw) => raw
                .parse::<AudioFormat>()
                .map_err(|e| SynthesisError::config(e.to_string()))?,
            None => AudioFormat::default(),
        };

        Ok(SynthesisTarget {
            api_key,
            url,
            model,
            voice,
            format,
        })
    }
}

/// 退避使用的文本长度：未裁剪文本的 UTF-16 码元数
fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
