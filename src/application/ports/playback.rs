//! Playback Port - 音频播放抽象
//!
//! 播放完成通过 future 返回，替代轮询式的完成检查

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::Expression;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Audio decoding error: {0}")]
    DecodingError(String),

    #[error("Playback device error: {0}")]
    DeviceError(String),
}

/// 播放请求
#[derive(Debug, Clone, Default)]
pub struct PlaybackRequest {
    /// 音频数据（WAV）
    pub audio: Vec<u8>,
    /// 口型音量序列
    pub volumes: Vec<f32>,
    /// 每个音量切片的时长（毫秒）
    pub slice_length_ms: u64,
    /// 播放时切换的表情
    pub expression: Option<Expression>,
}

/// Playback Port
///
/// `play` 在音频播放结束后返回
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    async fn play(&self, request: PlaybackRequest) -> Result<(), PlaybackError>;
}
