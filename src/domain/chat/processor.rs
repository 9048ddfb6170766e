//! 聊天记录的思考片段处理

use super::entities::{ChatMessage, Role};
use crate::domain::thinking::{filter_thinking_content, is_thinking};

/// 处理单条消息
///
/// 只处理 AI 消息：思考中的消息清空内容并打上标记，否则移除第一个思考片段
pub fn process_message(msg: &ChatMessage) -> ChatMessage {
    if msg.role != Role::Ai {
        return msg.clone();
    }

    let thinking = is_thinking(&msg.content);
    ChatMessage {
        content: if thinking {
            String::new()
        } else {
            filter_thinking_content(&msg.content)
        },
        is_thinking: thinking,
        ..msg.clone()
    }
}

/// 可显示的消息列表
///
/// 1. 过滤空白消息
/// 2. 处理思考片段
/// 3. 过滤处理后为空的消息，但保留思考中的消息
pub fn visible_messages(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    messages
        .iter()
        .filter(|msg| !msg.content.trim().is_empty())
        .map(process_message)
        .filter(|msg| !msg.content.is_empty() || msg.is_thinking)
        .collect()
}

/// 最后一条原始消息是否仍在思考
pub fn has_thinking_message(messages: &[ChatMessage]) -> bool {
    messages
        .last()
        .is_some_and(|msg| is_thinking(&msg.content))
}
