//! Playback Adapter - 音频播放实现

mod clock_playback;
mod fake_playback;

pub use clock_playback::{probe_wav_duration, ClockPlayback};
pub use fake_playback::{FakePlayback, FakePlaybackConfig};
