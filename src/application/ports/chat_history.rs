//! Chat History Port - 聊天记录与字幕

use crate::domain::chat::ChatMessage;

/// Chat History Port
pub trait ChatHistoryPort: Send + Sync {
    /// 追加一条消息
    ///
    /// 同一 `message_id` 的 AI 消息会合并到已有消息末尾
    fn append_message(&self, message: ChatMessage);

    /// 追加到当前完整回复
    fn append_response(&self, text: &str);

    /// 当前完整回复
    fn full_response(&self) -> String;

    /// 清空当前完整回复
    fn clear_response(&self);

    /// 所有原始消息
    fn messages(&self) -> Vec<ChatMessage>;

    /// 是否已有该 id 的消息
    fn contains_message(&self, message_id: &str) -> bool;

    /// 设置字幕
    fn set_subtitle(&self, text: &str);

    /// 当前字幕
    fn subtitle(&self) -> String;
}
