//! In-Memory Chat History Implementation

use std::sync::{Arc, RwLock};

use crate::application::ports::ChatHistoryPort;
use crate::domain::chat::{ChatMessage, Role};

#[derive(Default)]
struct HistoryState {
    messages: Vec<ChatMessage>,
    full_response: String,
    subtitle: String,
}

/// 内存聊天记录
#[derive(Default)]
pub struct InMemoryChatHistory {
    state: RwLock<HistoryState>,
}

impl InMemoryChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HistoryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HistoryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ChatHistoryPort for InMemoryChatHistory {
    fn append_message(&self, message: ChatMessage) {
        let mut state = self.write();

        // 同一条 AI 回复的后续片段合并到已有消息
        if message.role == Role::Ai {
            if let Some(existing) = state
                .messages
                .iter_mut()
                .rev()
                .find(|m| m.role == Role::Ai && m.id == message.id)
            {
                existing.content.push_str(&message.content);
                tracing::debug!(message_id = %message.id, "AI message extended");
                return;
            }
        }

        tracing::debug!(message_id = %message.id, role = ?message.role, "Message appended");
        state.messages.push(message);
    }

    fn append_response(&self, text: &str) {
        self.write().full_response.push_str(text);
    }

    fn full_response(&self) -> String {
        self.read().full_response.clone()
    }

    fn clear_response(&self) {
        self.write().full_response.clear();
    }

    fn messages(&self) -> Vec<ChatMessage> {
        self.read().messages.clone()
    }

    fn contains_message(&self, message_id: &str) -> bool {
        self.read().messages.iter().any(|m| m.id == message_id)
    }

    fn set_subtitle(&self, text: &str) {
        let mut state = self.write();
        state.subtitle.clear();
        state.subtitle.push_str(text);
    }

    fn subtitle(&self) -> String {
        self.read().subtitle.clone()
    }
}
