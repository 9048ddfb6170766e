//! Audio Commands - 音频播放相关命令

use serde::Serialize;

use crate::application::ports::AiState;
use crate::domain::chat::{DisplayText, Expression};

/// 添加音频播放任务
#[derive(Debug, Clone, Default)]
pub struct AddAudioTaskCommand {
    /// Base64 编码的 WAV 音频，为空时只显示文本
    pub audio_base64: Option<String>,
    /// 口型音量序列
    pub volumes: Vec<f32>,
    /// 每个音量切片的时长（毫秒）
    pub slice_length: u64,
    /// 显示文本
    pub display_text: Option<DisplayText>,
    /// 表情列表，播放时使用第一个
    pub expressions: Vec<Expression>,
    /// 是否为其他客户端转发来的音频
    pub forwarded: bool,
}

/// 添加音频任务响应
#[derive(Debug, Clone, Serialize)]
pub struct AddAudioTaskResponse {
    /// 是否已入队（打断状态下会被跳过）
    pub queued: bool,
    /// 当前等待中的任务数
    pub pending: usize,
}

/// 打断命令：丢弃所有未开始的播放任务
#[derive(Debug, Clone, Default)]
pub struct InterruptCommand;

/// 打断响应
#[derive(Debug, Clone, Serialize)]
pub struct InterruptResponse {
    pub dropped: usize,
}

/// 后端语音合成完成：等待本地播放排空后通知
#[derive(Debug, Clone, Default)]
pub struct BackendSynthCompleteCommand;

/// 设置 AI 状态
#[derive(Debug, Clone)]
pub struct SetAiStateCommand {
    pub state: AiState,
}

/// 设置 AI 状态响应
#[derive(Debug, Clone, Serialize)]
pub struct SetAiStateResponse {
    pub previous: AiState,
    pub state: AiState,
}
