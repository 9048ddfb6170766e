//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::infrastructure::memory::{DEFAULT_TASK_INTERVAL_MS, DEFAULT_TASK_TIMEOUT_MS};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 播放队列配置
    #[serde(default)]
    pub queue: QueueConfig,

    /// 播放器配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 播放队列配置
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// 相邻两个任务之间的间隔（毫秒）
    #[serde(default = "default_task_interval_ms")]
    pub task_interval_ms: u64,

    /// 单个任务超时（毫秒），0 表示不限时
    #[serde(default = "default_task_timeout_ms")]
    pub task_timeout_ms: u64,
}

fn default_task_interval_ms() -> u64 {
    DEFAULT_TASK_INTERVAL_MS
}

fn default_task_timeout_ms() -> u64 {
    DEFAULT_TASK_TIMEOUT_MS
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            task_interval_ms: default_task_interval_ms(),
            task_timeout_ms: default_task_timeout_ms(),
        }
    }
}

impl QueueConfig {
    pub fn task_interval(&self) -> Duration {
        Duration::from_millis(self.task_interval_ms)
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        (self.task_timeout_ms > 0).then(|| Duration::from_millis(self.task_timeout_ms))
    }
}

/// 播放器后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackBackend {
    /// 解析 WAV 时长并按时长等待
    #[default]
    Clock,
    /// 固定时长，用于开发调试
    Fake,
}

/// 播放器配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default)]
    pub backend: PlaybackBackend,

    /// Fake 后端每段音频的时长（毫秒）
    #[serde(default = "default_fake_duration_ms")]
    pub fake_duration_ms: u64,
}

fn default_fake_duration_ms() -> u64 {
    1000
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            backend: PlaybackBackend::default(),
            fake_duration_ms: default_fake_duration_ms(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
