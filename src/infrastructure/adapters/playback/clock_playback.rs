//! Clock Playback - 按音频时长占用播放通道
//!
//! 无声卡的服务端播放器：用 symphonia 解析 WAV 得到时长，然后等待同样的时间。
//! 播放完成的时刻与真实设备一致，供顺序队列计算任务间隔。

use async_trait::async_trait;
use std::io::Cursor;
use std::time::Duration;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{PlaybackError, PlaybackPort, PlaybackRequest};

/// 解析 WAV 时长
///
/// 优先使用容器头中的帧数；缺失时逐包解码累加帧数
pub fn probe_wav_duration(data: &[u8]) -> Result<Duration, PlaybackError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| PlaybackError::DecodingError(format!("Probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| PlaybackError::DecodingError("No audio track found".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|rate| *rate > 0)
        .ok_or_else(|| PlaybackError::DecodingError("Unknown sample rate".to_string()))?;

    let frames = match track.codec_params.n_frames {
        Some(frames) => frames,
        None => {
            let track_id = track.id;
            let mut decoder = symphonia::default::get_codecs()
                .make(&track.codec_params, &DecoderOptions::default())
                .map_err(|e| {
                    PlaybackError::DecodingError(format!("Decoder creation failed: {}", e))
                })?;

            let mut frames: u64 = 0;
            loop {
                let packet = match format.next_packet() {
                    Ok(p) => p,
                    Err(symphonia::core::errors::Error::IoError(e))
                        if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                    {
                        break;
                    }
                    Err(e) => {
                        return Err(PlaybackError::DecodingError(format!(
                            "Packet read error: {}",
                            e
                        )));
                    }
                };

                if packet.track_id() != track_id {
                    continue;
                }

                match decoder.decode(&packet) {
                    Ok(decoded) => frames += decoded.frames() as u64,
                    Err(e) => tracing::warn!("Decode error (skipping packet): {}", e),
                }
            }
            frames
        }
    };

    Ok(Duration::from_millis(frames * 1000 / sample_rate as u64))
}

/// 按时长播放
#[derive(Debug, Clone, Default)]
pub struct ClockPlayback;

impl ClockPlayback {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlaybackPort for ClockPlayback {
    async fn play(&self, request: PlaybackRequest) -> Result<(), PlaybackError> {
        if let Some(expression) = &request.expression {
            tracing::debug!(expression = %expression, "Expression set");
        }

        if request.audio.is_empty() {
            return Ok(());
        }

        let duration = probe_wav_duration(&request.audio)?;
        tracing::debug!(
            duration_ms = duration.as_millis() as u64,
            volume_slices = request.volumes.len(),
            "Clip playback started"
        );

        tokio::time::sleep(duration).await;

        tracing::debug!("Clip playback finished");
        Ok(())
    }
}
