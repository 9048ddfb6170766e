//! Message Queries - 消息文本与聊天记录查询

use serde::Serialize;

use crate::application::ports::{AiState, QueueStatus};
use crate::domain::chat::ChatMessage;
use crate::domain::SplitContent;

/// 分割流式消息文本
#[derive(Debug, Clone)]
pub struct SplitMessageQuery {
    /// 到目前为止累积的完整文本
    pub content: String,
}

/// 分割结果
#[derive(Debug, Clone, Serialize)]
pub struct SplitMessageResponse {
    #[serde(flatten)]
    pub split: SplitContent,
    /// 是否仍在思考
    pub is_thinking: bool,
    /// 可立即显示的文本：普通文本去掉思考片段，思考中为空
    pub display_text: String,
}

/// 获取聊天记录
#[derive(Debug, Clone, Default)]
pub struct GetChatHistoryQuery;

/// 聊天记录
#[derive(Debug, Clone, Serialize)]
pub struct ChatHistoryResponse {
    /// 处理后的可显示消息
    pub messages: Vec<ChatMessage>,
    /// 最后一条消息是否仍在思考
    pub has_thinking_message: bool,
    /// 当前完整回复
    pub full_response: String,
    /// 当前字幕（只含普通文本）
    pub subtitle: String,
    pub ai_state: AiState,
    pub queue: QueueStatus,
}
