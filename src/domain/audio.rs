//! Audio Payload - 音频格式与返回数据校验
//!
//! 只做字节层面的基本检查，不解码也不修复音频

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 合成请求固定使用的采样率
pub const SAMPLE_RATE: u32 = 32000;

/// 有效音频的最小字节数
pub const MIN_PAYLOAD_BYTES: usize = 100;

/// WAV 标准文件头长度
const WAV_HEADER_LEN: usize = 44;

/// 音频数据错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioPayloadError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Empty audio payload")]
    Empty,

    #[error("Audio payload too short: {0} bytes")]
    TooShort(usize),
}

/// 音频输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
    Opus,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
        }
    }

    /// HTTP Content-Type
    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Opus => "audio/ogg",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = AudioPayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wav" => Ok(AudioFormat::Wav),
            "mp3" => Ok(AudioFormat::Mp3),
            "opus" => Ok(AudioFormat::Opus),
            _ => Err(AudioPayloadError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// WAV 文件头探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavHeader {
    /// RIFF/WAVE 头完整
    Riff,
    /// 数据不足一个标准文件头
    Truncated,
    /// 前 12 字节不是 RIFF/WAVE
    Unrecognized,
}

/// 探测 WAV 文件头
pub fn sniff_wav_header(data: &[u8]) -> WavHeader {
    if data.len() < WAV_HEADER_LEN {
        return WavHeader::Truncated;
    }
    if &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
        WavHeader::Riff
    } else {
        WavHeader::Unrecognized
    }
}

/// 校验服务端返回的音频数据
///
/// 非空且不少于 [`MIN_PAYLOAD_BYTES`] 即视为有效。WAV 格式会探测文件头，
/// 但头部异常只记录日志，数据原样放行。
pub fn validate_payload(data: &[u8], format: AudioFormat) -> Result<(), AudioPayloadError> {
    if data.is_empty() {
        return Err(AudioPayloadError::Empty);
    }
    if data.len() < MIN_PAYLOAD_BYTES {
        return Err(AudioPayloadError::TooShort(data.len()));
    }

    if format == AudioFormat::Wav {
        let header = sniff_wav_header(data);
        if header != WavHeader::Riff {
            tracing::debug!(
                header = ?header,
                size = data.len(),
                "WAV payload without RIFF header, passing through"
            );
        }
    }

    Ok(())
}
