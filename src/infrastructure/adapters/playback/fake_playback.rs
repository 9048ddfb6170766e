//! Fake Playback - 固定时长的播放器
//!
//! 不解析音频，每次播放固定等待配置的时长，并记录播放次数

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{PlaybackError, PlaybackPort, PlaybackRequest};

/// Fake Playback 配置
#[derive(Debug, Clone)]
pub struct FakePlaybackConfig {
    /// 每段音频的播放时长
    pub duration: Duration,
    /// 为 true 时每次播放都返回错误
    pub fail: bool,
}

impl Default for FakePlaybackConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            fail: false,
        }
    }
}

/// Fake Playback
pub struct FakePlayback {
    config: FakePlaybackConfig,
    played: AtomicUsize,
}

impl FakePlayback {
    pub fn new(config: FakePlaybackConfig) -> Self {
        tracing::info!(
            duration_ms = config.duration.as_millis() as u64,
            "FakePlayback initialized"
        );
        Self {
            config,
            played: AtomicUsize::new(0),
        }
    }

    /// 已完成的播放次数
    pub fn played(&self) -> usize {
        self.played.load(Ordering::SeqCst)
    }
}

impl Default for FakePlayback {
    fn default() -> Self {
        Self::new(FakePlaybackConfig::default())
    }
}

#[async_trait]
impl PlaybackPort for FakePlayback {
    async fn play(&self, request: PlaybackRequest) -> Result<(), PlaybackError> {
        tracing::debug!(
            audio_len = request.audio.len(),
            expression = ?request.expression,
            "FakePlayback: simulating playback"
        );

        tokio::time::sleep(self.config.duration).await;

        if self.config.fail {
            return Err(PlaybackError::DeviceError("simulated failure".to_string()));
        }

        self.played.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
