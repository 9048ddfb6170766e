//! AI State Port - AI 状态

use serde::{Deserialize, Serialize};

/// AI 状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiState {
    #[default]
    Idle,
    ThinkingSpeaking,
    Interrupted,
    Loading,
    Listening,
    Waiting,
}

impl AiState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiState::Idle => "idle",
            AiState::ThinkingSpeaking => "thinking-speaking",
            AiState::Interrupted => "interrupted",
            AiState::Loading => "loading",
            AiState::Listening => "listening",
            AiState::Waiting => "waiting",
        }
    }
}

/// AI State Port
pub trait AiStatePort: Send + Sync {
    fn get(&self) -> AiState;

    /// 设置状态，返回旧状态
    fn set(&self, state: AiState) -> AiState;

    fn is_interrupted(&self) -> bool {
        self.get() == AiState::Interrupted
    }
}
