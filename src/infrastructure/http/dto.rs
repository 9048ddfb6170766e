//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{AddAudioTaskCommand, AiState};
use crate::domain::chat::{DisplayText, Expression};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Message DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SplitMessageRequest {
    pub content: String,
}

// ============================================================================
// Audio DTOs
// ============================================================================

/// 音频附带的动作
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioActions {
    #[serde(default)]
    pub expressions: Vec<Expression>,
}

/// 音频播放请求（HTTP 与 WebSocket 共用）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioTaskRequest {
    /// Base64 编码的 WAV
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub volumes: Vec<f32>,
    #[serde(default)]
    pub slice_length: u64,
    #[serde(default)]
    pub display_text: Option<DisplayText>,
    #[serde(default)]
    pub actions: Option<AudioActions>,
    #[serde(default)]
    pub forwarded: bool,
}

impl From<AudioTaskRequest> for AddAudioTaskCommand {
    fn from(req: AudioTaskRequest) -> Self {
        Self {
            audio_base64: req.audio,
            volumes: req.volumes,
            slice_length: req.slice_length,
            display_text: req.display_text,
            expressions: req.actions.map(|a| a.expressions).unwrap_or_default(),
            forwarded: req.forwarded,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetAiStateRequest {
    pub state: AiState,
}

// ============================================================================
// WebSocket 入站消息
// ============================================================================

/// WebSocket 入站消息，按 `type` 字段区分
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// 一段待播放的音频
    Audio(AudioTaskRequest),
    /// 后端语音合成全部完成
    BackendSynthComplete,
    /// 打断当前回复
    InterruptSignal,
    /// 整段文本（更新字幕）
    FullText { text: String },
    /// 设置 AI 状态
    SetAiState { state: AiState },
}
