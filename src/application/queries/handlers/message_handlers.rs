//! Message Query Handlers

use std::sync::Arc;

use crate::application::ports::{AiStatePort, ChatHistoryPort, TaskQueuePort};
use crate::application::queries::{
    ChatHistoryResponse, GetChatHistoryQuery, SplitMessageQuery, SplitMessageResponse,
};
use crate::domain::chat::{has_thinking_message, visible_messages};
use crate::domain::{filter_thinking_content, is_thinking, split_message_content, subtitle_text};

/// SplitMessage Handler - 纯函数，无依赖
#[derive(Debug, Clone, Default)]
pub struct SplitMessageHandler;

impl SplitMessageHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: SplitMessageQuery) -> SplitMessageResponse {
        let split = split_message_content(&query.content);
        // 代码块和表格里的括号不算思考片段，只检查普通文本
        let thinking = is_thinking(&split.plain_text);
        let display_text = if thinking {
            String::new()
        } else {
            filter_thinking_content(&split.plain_text)
        };

        SplitMessageResponse {
            split,
            is_thinking: thinking,
            display_text,
        }
    }
}

/// GetChatHistory Handler
pub struct GetChatHistoryHandler {
    chat_history: Arc<dyn ChatHistoryPort>,
    ai_state: Arc<dyn AiStatePort>,
    task_queue: Arc<dyn TaskQueuePort>,
}

impl GetChatHistoryHandler {
    pub fn new(
        chat_history: Arc<dyn ChatHistoryPort>,
        ai_state: Arc<dyn AiStatePort>,
        task_queue: Arc<dyn TaskQueuePort>,
    ) -> Self {
        Self {
            chat_history,
            ai_state,
            task_queue,
        }
    }

    pub fn handle(&self, _query: GetChatHistoryQuery) -> ChatHistoryResponse {
        let raw = self.chat_history.messages();

        ChatHistoryResponse {
            messages: visible_messages(&raw),
            has_thinking_message: has_thinking_message(&raw),
            full_response: self.chat_history.full_response(),
            subtitle: subtitle_text(&self.chat_history.subtitle()),
            ai_state: self.ai_state.get(),
            queue: self.task_queue.status(),
        }
    }
}
